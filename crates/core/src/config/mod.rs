//! Configuration management for decogen

pub mod loader;
mod settings;

// Re-export main types
pub use loader::ConfigLoader;
pub use settings::{CONFIG_FILE_NAME, Config};
