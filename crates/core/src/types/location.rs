use serde::Serialize;
use std::fmt;

/// Opaque identifier of a compilation unit's place in the module tree (a Go
/// import path such as `example.com/store` or `context`).
///
/// Used as the Declaration Store's cache key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ModuleLocation(String);

impl ModuleLocation {
    pub fn new(location: impl Into<String>) -> Self {
        Self(location.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ModuleLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ModuleLocation {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ModuleLocation {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for ModuleLocation {
    fn from(value: String) -> Self {
        Self(value)
    }
}
