//! Boundary validation errors

use thiserror::Error;

/// Why a client-supplied value was rejected before reaching a store.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("missing required field: {field}")]
    Missing { field: &'static str },

    #[error("field must not be empty: {field}")]
    Blank { field: &'static str },

    #[error("field {field} must be an integer, got {value:?}")]
    NotAnInteger { field: &'static str, value: String },
}

impl ValidationError {
    /// Name of the offending field
    pub fn field(&self) -> &'static str {
        match self {
            ValidationError::Missing { field }
            | ValidationError::Blank { field }
            | ValidationError::NotAnInteger { field, .. } => field,
        }
    }
}
