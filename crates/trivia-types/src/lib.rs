//! Trivia Types - Pure type definitions
//!
//! This crate contains only plain data types and their boundary validation,
//! with no async runtime or storage dependencies.

pub mod category;
pub mod error;
pub mod question;
pub mod quiz;

pub use category::*;
pub use error::ValidationError;
pub use question::*;
pub use quiz::*;

use serde::{Deserialize, Serialize};

/// A field that clients send either as a JSON number or as a string.
///
/// Older clients post `"category": "2"` while newer ones post `"category": 2`,
/// so integer fields are accepted in both shapes and normalized at the boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum IntOrText {
    Int(i64),
    Text(String),
}

impl IntOrText {
    /// Normalize to an integer, reporting `field` on failure.
    pub fn to_int(&self, field: &'static str) -> Result<i64, ValidationError> {
        match self {
            IntOrText::Int(value) => Ok(*value),
            IntOrText::Text(text) => {
                let trimmed = text.trim();
                if trimmed.is_empty() {
                    return Err(ValidationError::Blank { field });
                }
                trimmed
                    .parse::<i64>()
                    .map_err(|_| ValidationError::NotAnInteger {
                        field,
                        value: text.clone(),
                    })
            }
        }
    }
}

impl From<i64> for IntOrText {
    fn from(value: i64) -> Self {
        IntOrText::Int(value)
    }
}

impl From<&str> for IntOrText {
    fn from(value: &str) -> Self {
        IntOrText::Text(value.to_string())
    }
}
