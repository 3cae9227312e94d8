//! decogen-core - Resolution and generation engine for Go interface decorators
//!
//! This crate provides functionality to:
//! - Parse Go packages and cache their top-level type declarations per import path
//! - Resolve type references across packages and rewrite them into a generated
//!   file's own import namespace
//! - Walk an interface's method set, including embedded interfaces, and hand
//!   normalized methods to a pluggable emission model
pub mod config;
pub mod emit;
pub mod error;
pub mod generator;
pub mod interfaces;
pub mod parser;
pub mod resolution;
pub mod source;
pub mod syntax;
pub mod types;
pub mod utils;

// Re-export commonly used types and traits
pub use error::{Error, Result};
pub use types::*;

// Re-export main API components
pub use config::Config;
pub use emit::SourceFile;
pub use generator::Generator;
pub use interfaces::{EmissionModel, Importer};
pub use resolution::{Locator, LocatorContext, Resolver, TypeDiscovery};
pub use source::{FsModuleSource, MemoryModuleSource, ModuleSource};
