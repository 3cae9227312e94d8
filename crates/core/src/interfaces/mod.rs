//! Collaborator contract between the engine and a code-emission model.
//!
//! The engine never produces source text itself. It registers every module
//! location a resolved type needs through [`Importer`] and hands one
//! [`MethodConfig`] per concrete method to [`EmissionModel::add_method`].
//! Per-tool behavior (logging, metrics, tracing, stubbing) lives entirely in
//! the model.

use crate::{
    error::Result,
    types::{MethodConfig, ModuleLocation},
};

/// Import-alias registration.
pub trait Importer {
    /// Registers `location` and returns the alias generated code must use to
    /// refer to it.
    ///
    /// Idempotent per location: a location registered twice yields the alias
    /// issued the first time. `suggested` is preferred for a fresh location
    /// when it is available.
    fn add_import(&mut self, suggested: &str, location: &ModuleLocation) -> String;
}

/// A per-tool code-emission model.
pub trait EmissionModel: Importer {
    /// Accepts one fully resolved method. An error aborts the generation run.
    fn add_method(&mut self, method: MethodConfig) -> Result<()>;
}

impl<T: Importer + ?Sized> Importer for &mut T {
    fn add_import(&mut self, suggested: &str, location: &ModuleLocation) -> String {
        (**self).add_import(suggested, location)
    }
}

impl<T: EmissionModel + ?Sized> EmissionModel for &mut T {
    fn add_method(&mut self, method: MethodConfig) -> Result<()> {
        (**self).add_method(method)
    }
}
