use super::{ModuleSource, SourceUnit};
use crate::{
    error::{Error, Result},
    types::ModuleLocation,
};
use std::cell::RefCell;
use std::collections::HashMap;

/// In-memory module tree. Records how often each location was loaded.
#[derive(Debug, Default)]
pub struct MemoryModuleSource {
    modules: HashMap<ModuleLocation, Vec<SourceUnit>>,
    loads: RefCell<HashMap<ModuleLocation, usize>>,
}

impl MemoryModuleSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a file to `location`, creating the location if needed.
    pub fn with_file(
        mut self,
        location: impl Into<ModuleLocation>,
        file_name: &str,
        text: &str,
    ) -> Self {
        self.add_file(location, file_name, text);
        self
    }

    pub fn add_file(&mut self, location: impl Into<ModuleLocation>, file_name: &str, text: &str) {
        let location = location.into();
        let path = format!("{location}/{file_name}");
        self.modules
            .entry(location)
            .or_default()
            .push(SourceUnit::new(path, text));
    }

    /// Number of times `location` was loaded.
    pub fn load_count(&self, location: &str) -> usize {
        self.loads
            .borrow()
            .get(&ModuleLocation::from(location))
            .copied()
            .unwrap_or(0)
    }
}

impl ModuleSource for MemoryModuleSource {
    fn load(&self, location: &ModuleLocation) -> Result<Vec<SourceUnit>> {
        *self.loads.borrow_mut().entry(location.clone()).or_default() += 1;
        self.modules
            .get(location)
            .cloned()
            .ok_or_else(|| Error::LocationNotFound {
                location: location.to_string(),
            })
    }
}
