//! Storage traits for persistence

use crate::Result;
use async_trait::async_trait;
use trivia_types::{Category, CategoryId, NewQuestion, Question, QuestionId};

/// Category store
#[async_trait]
pub trait CategoryStore: Send + Sync {
    async fn get_category(&self, id: CategoryId) -> Result<Option<Category>>;
    /// All categories in ascending id order
    async fn list_categories(&self) -> Result<Vec<Category>>;
    /// Setup/seed time only. Categories are never changed once created.
    async fn insert_category(&self, kind: &str) -> Result<CategoryId>;
}

/// Question store
///
/// `list_all` must return one consistent snapshot, and `insert`/`delete` must
/// either commit entirely or leave the store untouched.
#[async_trait]
pub trait QuestionStore: Send + Sync {
    /// All questions in ascending id order
    async fn list_all(&self) -> Result<Vec<Question>>;
    async fn insert(&self, question: &NewQuestion) -> Result<QuestionId>;
    /// Returns `false` when no question had this id
    async fn delete(&self, id: QuestionId) -> Result<bool>;
}

/// A single backend holding both record kinds
pub trait TriviaStore: CategoryStore + QuestionStore {}

impl<T: CategoryStore + QuestionStore> TriviaStore for T {}
