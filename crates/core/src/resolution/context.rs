use crate::{syntax::GoFile, types::ModuleLocation};

/// Prefix used for unqualified references.
pub const LOCAL_PREFIX: &str = ".";

/// How an import entry can be referred to from source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportAlias {
    /// The declaring location itself, or a dot-import.
    Local,
    /// `import "example.com/kv"`, referred to by its package name.
    Unaliased,
    /// `import store "example.com/kv"`.
    Named(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportEntry {
    pub alias: ImportAlias,
    pub location: ModuleLocation,
}

impl ImportEntry {
    pub fn new(alias: ImportAlias, location: impl Into<ModuleLocation>) -> Self {
        Self {
            alias,
            location: location.into(),
        }
    }
}

/// The set of module locations reachable from one file, keyed by the prefix
/// a reference uses.
///
/// Entries are kept in registration order; the declaring location is always
/// registered first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocatorContext {
    imports: Vec<ImportEntry>,
}

impl LocatorContext {
    /// Context for the very first lookup: only the starting location, as the
    /// local prefix.
    pub fn single_location(location: impl Into<ModuleLocation>) -> Self {
        Self {
            imports: vec![ImportEntry::new(ImportAlias::Local, location)],
        }
    }

    /// Context of a discovered file: its declaring location as the local
    /// prefix, followed by the file's import table.
    pub fn from_file(file: &GoFile, location: &ModuleLocation) -> Self {
        let mut imports = vec![ImportEntry::new(ImportAlias::Local, location.clone())];
        imports.extend(file.imports.iter().map(|spec| {
            let alias = match spec.name.as_deref() {
                None => ImportAlias::Unaliased,
                Some(LOCAL_PREFIX) => ImportAlias::Local,
                Some(name) => ImportAlias::Named(name.to_string()),
            };
            ImportEntry::new(alias, spec.path.as_str())
        }));
        Self { imports }
    }

    pub fn with_entry(mut self, entry: ImportEntry) -> Self {
        self.imports.push(entry);
        self
    }

    /// Locations a reference with `prefix` may point to, in the order they
    /// must be searched.
    ///
    /// - [`LOCAL_PREFIX`]: every local entry.
    /// - an exact alias match: that single location.
    /// - otherwise every unaliased import whose path ends with `prefix`.
    pub fn candidate_locations(&self, prefix: &str) -> Vec<ModuleLocation> {
        if prefix == LOCAL_PREFIX {
            return self.local_locations();
        }
        if let Some(location) = self.aliased_location(prefix) {
            return vec![location.clone()];
        }
        self.unaliased_locations(prefix)
    }

    fn local_locations(&self) -> Vec<ModuleLocation> {
        self.imports
            .iter()
            .filter(|entry| entry.alias == ImportAlias::Local)
            .map(|entry| entry.location.clone())
            .collect()
    }

    fn aliased_location(&self, prefix: &str) -> Option<&ModuleLocation> {
        self.imports
            .iter()
            .find(|entry| matches!(&entry.alias, ImportAlias::Named(name) if name == prefix))
            .map(|entry| &entry.location)
    }

    fn unaliased_locations(&self, prefix: &str) -> Vec<ModuleLocation> {
        self.imports
            .iter()
            .filter(|entry| {
                entry.alias == ImportAlias::Unaliased && entry.location.as_str().ends_with(prefix)
            })
            .map(|entry| entry.location.clone())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::ImportSpec;
    use std::path::PathBuf;

    fn locations(list: Vec<ModuleLocation>) -> Vec<String> {
        list.into_iter().map(|l| l.to_string()).collect()
    }

    fn file_with_imports(imports: &[(Option<&str>, &str)]) -> GoFile {
        GoFile {
            path: PathBuf::from("svc/svc.go"),
            package: "svc".to_string(),
            imports: imports
                .iter()
                .map(|(name, path)| ImportSpec {
                    name: name.map(str::to_string),
                    path: path.to_string(),
                })
                .collect(),
            types: Vec::new(),
        }
    }

    #[test]
    fn test_single_location_context() {
        let ctx = LocatorContext::single_location("example.com/svc");
        assert_eq!(locations(ctx.candidate_locations(".")), vec!["example.com/svc"]);
        assert!(ctx.candidate_locations("svc").is_empty());
    }

    #[test]
    fn test_file_context_resolution_policy() {
        let file = file_with_imports(&[
            (None, "context"),
            (Some("store"), "example.com/internal/kv"),
            (Some("."), "example.com/dot"),
            (None, "example.com/store"),
            (None, "github.com/other/store"),
            (Some("_"), "example.com/side"),
        ]);
        let ctx = LocatorContext::from_file(&file, &ModuleLocation::from("example.com/svc"));

        assert_eq!(
            locations(ctx.candidate_locations(".")),
            vec!["example.com/svc", "example.com/dot"]
        );
        // An exact alias shadows the suffix fallback.
        assert_eq!(
            locations(ctx.candidate_locations("store")),
            vec!["example.com/internal/kv"]
        );
        assert_eq!(locations(ctx.candidate_locations("context")), vec!["context"]);
        assert!(ctx.candidate_locations("missing").is_empty());
    }

    #[test]
    fn test_suffix_fallback_returns_every_match_in_order() {
        let file = file_with_imports(&[
            (None, "example.com/store"),
            (None, "github.com/other/store"),
        ]);
        let ctx = LocatorContext::from_file(&file, &ModuleLocation::from("example.com/svc"));

        assert_eq!(
            locations(ctx.candidate_locations("store")),
            vec!["example.com/store", "github.com/other/store"]
        );
    }
}
