//! Trivia Core Library
//!
//! Question retrieval and selection over pluggable category/question stores.

// Re-export pure types from trivia-types
pub use trivia_types::*;

pub mod engine;
pub mod error;
pub mod pagination;
pub mod ports;

pub use engine::{CategoryQuestions, QueryEngine, QuestionPage, SearchResults};
pub use error::{Result, TriviaError};
pub use pagination::{Page, QUESTIONS_PER_PAGE};
