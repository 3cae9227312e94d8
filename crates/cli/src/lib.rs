pub mod cli;
pub mod commands;
pub mod models;

// Re-export commonly used items
pub use cli::{Cli, Commands};
