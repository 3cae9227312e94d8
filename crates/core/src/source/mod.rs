//! Access to the compilation units stored at a module location.
//!
//! The Declaration Store never touches the filesystem directly; it asks a
//! `ModuleSource` for the units of a location and parses them itself.

pub mod fs;
pub mod go_mod;
pub mod memory;

use crate::{error::Result, types::ModuleLocation};
use std::path::PathBuf;
use std::rc::Rc;

pub use fs::FsModuleSource;
pub use memory::MemoryModuleSource;

/// One source file at a module location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceUnit {
    pub path: PathBuf,
    pub text: String,
}

impl SourceUnit {
    pub fn new(path: impl Into<PathBuf>, text: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            text: text.into(),
        }
    }
}

/// Maps a module location to its compilation units.
pub trait ModuleSource {
    /// Returns every unit at `location`, in a stable order.
    ///
    /// A location that cannot be found is an error, not an empty list.
    fn load(&self, location: &ModuleLocation) -> Result<Vec<SourceUnit>>;
}

impl<T: ModuleSource + ?Sized> ModuleSource for Rc<T> {
    fn load(&self, location: &ModuleLocation) -> Result<Vec<SourceUnit>> {
        (**self).load(location)
    }
}
