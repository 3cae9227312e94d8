//! Declaration lookup and type-expression rewriting.
//!
//! - [`Locator`]: the Declaration Store, a per-location cache of parsed
//!   top-level type declarations.
//! - [`LocatorContext`]: which locations a reference prefix may point to,
//!   derived from the file being processed.
//! - [`Resolver`]: rewrites type expressions into the generated file's import
//!   namespace.

pub mod context;
pub mod locator;
pub mod resolver;

pub use context::{ImportAlias, ImportEntry, LOCAL_PREFIX, LocatorContext};
pub use locator::{Locator, TypeDiscovery};
pub use resolver::{Resolver, is_builtin};
