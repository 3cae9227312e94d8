//! Go source parsing using tree-sitter

pub mod declarations;
pub mod go_parser;
pub mod utils;

// Re-export commonly used items
pub use go_parser::GoParser;
pub use utils::{Position, node_to_position};
