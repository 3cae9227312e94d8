pub mod location;
pub mod method;

// Re-export commonly used types
pub use location::ModuleLocation;
pub use method::{MethodConfig, NormalizedField};
