//! Database and installation error types for sift-db.

use sift_core::errors::CoreError;
use sift_schema::ValidationErrors;
use thiserror::Error;

/// Errors from database operations.
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// A SQL query failed.
    #[error("Query failed: {0}")]
    Query(String),

    /// Schema migration failed.
    #[error("Migration failed: {0}")]
    Migration(String),

    /// Expected a result row but none was returned.
    #[error("No result returned")]
    NoResult,

    /// Invalid state encountered (e.g., bad data in DB).
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// Underlying libSQL error.
    #[error("libSQL error: {0}")]
    LibSql(#[from] libsql::Error),

    /// ID generation or other core failure.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Catch-all for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Outcome of a failed project installation.
///
/// `Internal` renders a generic message. The underlying database error is
/// logged where it happens and kept as the source.
#[derive(Debug, Error)]
pub enum InstallError {
    /// The raw document did not validate.
    #[error(transparent)]
    Validation(#[from] ValidationErrors),

    /// Another project already owns this label.
    #[error("a project labelled `{label}` already exists")]
    Conflict { label: String },

    /// Any other failure; nothing was written.
    #[error("Project installation failed")]
    Internal(#[from] DatabaseError),
}
