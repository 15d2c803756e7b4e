//! Schema validation error types.

use serde::Serialize;
use sift_core::responses::FieldError;
use thiserror::Error;

/// Errors from the schema registry.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// Requested schema name was not found in the registry.
    #[error("Schema not found: {0}")]
    NotFound(String),

    /// JSON value did not pass schema validation.
    #[error(transparent)]
    ValidationFailed(#[from] ValidationErrors),

    /// Schema generation or compilation error.
    #[error("Schema generation error: {0}")]
    Generation(String),
}

/// Every violation found in one document, in discovery order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Error)]
#[error("validation failed with {} error(s)", .errors.len())]
#[serde(transparent)]
pub struct ValidationErrors {
    errors: Vec<FieldError>,
}

impl ValidationErrors {
    #[must_use]
    pub const fn new(errors: Vec<FieldError>) -> Self {
        Self { errors }
    }

    /// A single error not tied to a specific field.
    #[must_use]
    pub fn root(message: impl Into<String>) -> Self {
        Self::new(vec![FieldError::new("", message)])
    }

    #[must_use]
    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    #[must_use]
    pub fn into_errors(self) -> Vec<FieldError> {
        self.errors
    }

    /// Paths of all offending fields.
    #[must_use]
    pub fn paths(&self) -> Vec<&str> {
        self.errors.iter().map(|e| e.path.as_str()).collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }
}
