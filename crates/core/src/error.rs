use std::io;

/// Errors that can occur while locating, resolving and generating decorators.
///
/// Every variant is fatal to the generation run that produced it; the engine
/// never emits a partially resolved declaration set.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("could not find '{name}' type")]
    TypeNotFound { name: String },

    #[error("type '{name}' in '{location}' is not an interface")]
    NotAnInterface { name: String, location: String },

    #[error("unresolvable type expression: {0}")]
    UnresolvableTypeExpression(String),

    #[error("failed to parse '{location}': {reason}")]
    ParseFailure { location: String, reason: String },

    #[error("unsupported declaration shape: {0}")]
    UnsupportedDeclarationShape(String),

    #[error("no source directory found for module location '{location}'")]
    LocationNotFound { location: String },

    #[error("Tree-sitter error: {0}")]
    TreeSitterError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("emission model rejected method: {0}")]
    Emission(String),

    #[error("IO error: {0}")]
    IoError(#[from] io::Error),
}

/// Result type alias for decogen operations
pub type Result<T> = std::result::Result<T, Error>;
