//! Building blocks for emission models.

mod source_file;

pub use source_file::{GENERATED_HEADER, SourceFile};
