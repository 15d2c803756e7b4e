//! Cross-cutting error types for Sift.
//!
//! Domain-specific errors (`DatabaseError`, `SchemaError`, `ConfigError`) are
//! defined in their respective crates. The CLI converges them with `anyhow`.

use thiserror::Error;

/// Errors that can be raised by any Sift crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A string does not satisfy the identifier pattern.
    #[error(
        "Invalid identifier '{0}': expected a letter or underscore followed by letters, digits or underscores"
    )]
    InvalidIdentifier(String),

    /// Data failed validation (format, constraints).
    #[error("Validation error: {0}")]
    Validation(String),

    /// Catch-all for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
