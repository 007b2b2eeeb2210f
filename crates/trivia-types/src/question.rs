//! Question types

use crate::{CategoryId, IntOrText, ValidationError};
use serde::{Deserialize, Serialize};

pub type QuestionId = i64;

/// A stored trivia question
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: QuestionId,
    pub question: String,
    pub answer: String,
    pub category: CategoryId,
    pub difficulty: i64,
}

impl Question {
    /// Case-insensitive substring match against the prompt text only.
    ///
    /// `needle` must already be lowercased.
    pub fn prompt_contains(&self, needle: &str) -> bool {
        self.question.to_lowercase().contains(needle)
    }
}

/// A validated question that has not been assigned an id yet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewQuestion {
    pub question: String,
    pub answer: String,
    pub category: CategoryId,
    pub difficulty: i64,
}

impl NewQuestion {
    pub fn with_id(self, id: QuestionId) -> Question {
        Question {
            id,
            question: self.question,
            answer: self.answer,
            category: self.category,
            difficulty: self.difficulty,
        }
    }
}

/// Question creation request as posted by clients.
///
/// Every field is optional here so that a missing field surfaces as a
/// [`ValidationError`] rather than a deserialization failure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionDraft {
    pub question: Option<String>,
    pub answer: Option<String>,
    pub category: Option<IntOrText>,
    pub difficulty: Option<IntOrText>,
}

impl QuestionDraft {
    pub fn new(
        question: impl Into<String>,
        answer: impl Into<String>,
        category: impl Into<IntOrText>,
        difficulty: impl Into<IntOrText>,
    ) -> Self {
        Self {
            question: Some(question.into()),
            answer: Some(answer.into()),
            category: Some(category.into()),
            difficulty: Some(difficulty.into()),
        }
    }

    /// Check all four fields and normalize category/difficulty to integers
    pub fn validate(&self) -> Result<NewQuestion, ValidationError> {
        let question = required_text("question", self.question.as_deref())?;
        let answer = required_text("answer", self.answer.as_deref())?;
        let category = self
            .category
            .as_ref()
            .ok_or(ValidationError::Missing { field: "category" })?
            .to_int("category")?;
        let difficulty = self
            .difficulty
            .as_ref()
            .ok_or(ValidationError::Missing {
                field: "difficulty",
            })?
            .to_int("difficulty")?;

        Ok(NewQuestion {
            question,
            answer,
            category,
            difficulty,
        })
    }
}

fn required_text(field: &'static str, value: Option<&str>) -> Result<String, ValidationError> {
    let value = value.ok_or(ValidationError::Missing { field })?;
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Blank { field });
    }
    Ok(trimmed.to_string())
}
