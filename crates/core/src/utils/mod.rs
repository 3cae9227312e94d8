pub mod naming;
pub mod serde_helpers;

pub use naming::{is_identifier, to_snake_case};
