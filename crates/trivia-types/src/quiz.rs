//! Quiz request types

use crate::{CategoryId, IntOrText, QuestionId, ValidationError};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Which categories a quiz draws from.
///
/// `All` is its own variant; no real category id doubles as "all".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuizCategory {
    All,
    Id(CategoryId),
}

/// Category selector as posted by clients: `{"id": 3, "type": "History"}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizCategoryRef {
    pub id: IntOrText,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
}

impl TryFrom<&QuizCategoryRef> for QuizCategory {
    type Error = ValidationError;

    fn try_from(value: &QuizCategoryRef) -> Result<Self, Self::Error> {
        match &value.id {
            IntOrText::Text(text) if text.trim().eq_ignore_ascii_case("all") => {
                Ok(QuizCategory::All)
            }
            other => other.to_int("quiz_category.id").map(QuizCategory::Id),
        }
    }
}

/// Body of `POST /quizzes`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizRequest {
    pub previous_questions: Vec<QuestionId>,
    #[serde(default)]
    pub quiz_category: Option<QuizCategoryRef>,
    #[serde(default)]
    pub difficulty: Option<IntOrText>,
}

impl QuizRequest {
    pub fn category(&self) -> Result<QuizCategory, ValidationError> {
        match &self.quiz_category {
            Some(selector) => QuizCategory::try_from(selector),
            None => Ok(QuizCategory::All),
        }
    }

    pub fn difficulty(&self) -> Result<Option<i64>, ValidationError> {
        self.difficulty
            .as_ref()
            .map(|d| d.to_int("difficulty"))
            .transpose()
    }
}

/// Everything that narrows the quiz candidate set
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizCriteria {
    pub category: QuizCategory,
    pub excluded: HashSet<QuestionId>,
    pub difficulty: Option<i64>,
}

impl QuizCriteria {
    pub fn new(category: QuizCategory) -> Self {
        Self {
            category,
            excluded: HashSet::new(),
            difficulty: None,
        }
    }

    pub fn excluding(mut self, ids: impl IntoIterator<Item = QuestionId>) -> Self {
        self.excluded.extend(ids);
        self
    }

    pub fn with_difficulty(mut self, difficulty: Option<i64>) -> Self {
        self.difficulty = difficulty;
        self
    }
}

impl TryFrom<&QuizRequest> for QuizCriteria {
    type Error = ValidationError;

    fn try_from(req: &QuizRequest) -> Result<Self, Self::Error> {
        Ok(QuizCriteria::new(req.category()?)
            .excluding(req.previous_questions.iter().copied())
            .with_difficulty(req.difficulty()?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_sentinel_is_distinct_from_zero() {
        let all: QuizRequest = serde_json::from_str(
            r#"{"previous_questions": [], "quiz_category": {"id": "ALL", "type": "click"}}"#,
        )
        .unwrap();
        assert_eq!(all.category().unwrap(), QuizCategory::All);

        let zero: QuizRequest =
            serde_json::from_str(r#"{"previous_questions": [], "quiz_category": {"id": 0}}"#)
                .unwrap();
        assert_eq!(zero.category().unwrap(), QuizCategory::Id(0));
    }

    #[test]
    fn test_missing_category_means_all() {
        let req: QuizRequest = serde_json::from_str(r#"{"previous_questions": [4, 9]}"#).unwrap();
        let criteria = QuizCriteria::try_from(&req).unwrap();
        assert_eq!(criteria.category, QuizCategory::All);
        assert!(criteria.excluded.contains(&4));
        assert!(criteria.excluded.contains(&9));
        assert_eq!(criteria.difficulty, None);
    }

    #[test]
    fn test_string_category_id_is_normalized() {
        let req: QuizRequest = serde_json::from_str(
            r#"{"previous_questions": [20, 21], "quiz_category": {"type": "Science", "id": "1"}}"#,
        )
        .unwrap();
        assert_eq!(req.category().unwrap(), QuizCategory::Id(1));
    }

    #[test]
    fn test_difficulty_accepts_number_or_string() {
        let text: QuizRequest =
            serde_json::from_str(r#"{"previous_questions": [], "difficulty": "3"}"#).unwrap();
        let number: QuizRequest =
            serde_json::from_str(r#"{"previous_questions": [], "difficulty": 3}"#).unwrap();
        assert_eq!(QuizCriteria::try_from(&text).unwrap().difficulty, Some(3));
        assert_eq!(QuizCriteria::try_from(&number).unwrap().difficulty, Some(3));

        let hard: QuizRequest =
            serde_json::from_str(r#"{"previous_questions": [], "difficulty": "hard"}"#).unwrap();
        assert_eq!(
            QuizCriteria::try_from(&hard),
            Err(ValidationError::NotAnInteger {
                field: "difficulty",
                value: "hard".to_string()
            })
        );
    }

    #[test]
    fn test_previous_questions_is_required() {
        assert!(serde_json::from_str::<QuizRequest>("{}").is_err());
    }
}
