//! Validation error types.

use serde::Serialize;
use thiserror::Error;

/// A single field validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    /// The field name that failed validation
    pub field: String,
    /// The failure code (`"required"`, `"type"`)
    pub code: String,
    /// Human-readable message
    pub message: String,
}

impl FieldError {
    /// Create a new field error.
    pub fn new(
        field: impl Into<String>,
        code: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            field: field.into(),
            code: code.into(),
            message: message.into(),
        }
    }
}

/// Aggregate of field failures for one payload.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[error("validation failed: {} field(s) rejected", fields.len())]
pub struct ValidationError {
    /// Collection of field-level failures
    pub fields: Vec<FieldError>,
}

impl ValidationError {
    /// Create a validation error from field failures.
    pub fn new(fields: Vec<FieldError>) -> Self {
        Self { fields }
    }
}
