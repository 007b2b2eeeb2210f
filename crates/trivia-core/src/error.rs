//! Error types for the trivia core

use thiserror::Error;
use trivia_types::ValidationError;

pub type Result<T> = std::result::Result<T, TriviaError>;

#[derive(Error, Debug)]
pub enum TriviaError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("{resource} not found: {id}")]
    NotFound { resource: &'static str, id: i64 },

    #[error("Store error: {0}")]
    Store(String),
}

impl TriviaError {
    pub fn category_not_found(id: i64) -> Self {
        TriviaError::NotFound {
            resource: "category",
            id,
        }
    }

    pub fn question_not_found(id: i64) -> Self {
        TriviaError::NotFound {
            resource: "question",
            id,
        }
    }

    /// Wrap any backend failure as a store error
    pub fn store(e: impl std::fmt::Display) -> Self {
        TriviaError::Store(e.to_string())
    }
}
