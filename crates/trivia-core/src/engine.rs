//! Query engine
//!
//! Answers every question listing, search, category filter and quiz pick over
//! a snapshot taken from the question store. Pagination and filtering run in
//! process memory on that snapshot.

use crate::pagination::{Page, QUESTIONS_PER_PAGE};
use crate::ports::{CategoryStore, QuestionStore, TriviaStore};
use crate::{Result, TriviaError};
use rand::seq::SliceRandom;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info};
use trivia_types::{
    category_map, Category, CategoryId, CategoryMap, Question, QuestionDraft, QuestionId,
    QuizCategory, QuizCriteria,
};

/// One page of the global question listing
#[derive(Debug, Clone, Serialize)]
pub struct QuestionPage {
    pub questions: Vec<Question>,
    /// Count of all questions, not of this page
    pub total_questions: usize,
    pub categories: CategoryMap,
}

#[derive(Debug, Clone, Serialize)]
pub struct SearchResults {
    pub questions: Vec<Question>,
    pub total_questions: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct CategoryQuestions {
    pub category: Category,
    pub questions: Vec<Question>,
    pub total_questions: usize,
}

pub struct QueryEngine {
    categories: Arc<dyn CategoryStore>,
    questions: Arc<dyn QuestionStore>,
}

impl QueryEngine {
    /// Build an engine over one backend that stores both record kinds
    pub fn new<S: TriviaStore + 'static>(store: Arc<S>) -> Self {
        Self {
            categories: store.clone(),
            questions: store,
        }
    }

    pub fn from_parts(
        categories: Arc<dyn CategoryStore>,
        questions: Arc<dyn QuestionStore>,
    ) -> Self {
        Self {
            categories,
            questions,
        }
    }

    pub async fn list_categories(&self) -> Result<Vec<Category>> {
        self.categories.list_categories().await
    }

    pub async fn get_category(&self, id: CategoryId) -> Result<Category> {
        self.categories
            .get_category(id)
            .await?
            .ok_or_else(|| TriviaError::category_not_found(id))
    }

    pub async fn list_questions(&self, page: Page) -> Result<QuestionPage> {
        let all = self.questions.list_all().await?;
        let total_questions = all.len();
        let questions = page.slice(all, QUESTIONS_PER_PAGE);
        let categories = category_map(&self.categories.list_categories().await?);

        debug!(
            "Listed page {}: {} of {} questions",
            page.number(),
            questions.len(),
            total_questions
        );

        Ok(QuestionPage {
            questions,
            total_questions,
            categories,
        })
    }

    /// Case-insensitive substring match on the prompt. A blank term matches
    /// every question; any other term is matched as given, spaces included.
    pub async fn search_questions(&self, term: &str) -> Result<SearchResults> {
        let needle = if term.trim().is_empty() {
            String::new()
        } else {
            term.to_lowercase()
        };
        let questions: Vec<Question> = self
            .questions
            .list_all()
            .await?
            .into_iter()
            .filter(|q| q.prompt_contains(&needle))
            .collect();

        debug!("Search {:?} matched {} questions", term, questions.len());

        Ok(SearchResults {
            total_questions: questions.len(),
            questions,
        })
    }

    pub async fn list_by_category(&self, category_id: CategoryId) -> Result<CategoryQuestions> {
        let category = self.get_category(category_id).await?;
        let questions: Vec<Question> = self
            .questions
            .list_all()
            .await?
            .into_iter()
            .filter(|q| q.category == category_id)
            .collect();

        Ok(CategoryQuestions {
            category,
            total_questions: questions.len(),
            questions,
        })
    }

    /// Pick a random question the player has not seen yet.
    ///
    /// `Ok(None)` means the candidate set is exhausted.
    pub async fn select_quiz_question(&self, criteria: &QuizCriteria) -> Result<Option<Question>> {
        if let QuizCategory::Id(id) = criteria.category {
            self.get_category(id).await?;
        }

        let candidates: Vec<Question> = self
            .questions
            .list_all()
            .await?
            .into_iter()
            .filter(|q| match criteria.category {
                QuizCategory::All => true,
                QuizCategory::Id(id) => q.category == id,
            })
            .filter(|q| criteria.difficulty.map_or(true, |d| q.difficulty == d))
            .filter(|q| !criteria.excluded.contains(&q.id))
            .collect();

        debug!(
            "Quiz over {:?}: {} candidates, {} excluded",
            criteria.category,
            candidates.len(),
            criteria.excluded.len()
        );

        Ok(candidates.choose(&mut rand::thread_rng()).cloned())
    }

    pub async fn create_question(&self, draft: &QuestionDraft) -> Result<QuestionId> {
        let question = draft.validate()?;
        let id = self.questions.insert(&question).await?;
        info!("Created question {} in category {}", id, question.category);
        Ok(id)
    }

    pub async fn delete_question(&self, id: QuestionId) -> Result<()> {
        if !self.questions.delete(id).await? {
            return Err(TriviaError::question_not_found(id));
        }
        info!("Deleted question {}", id);
        Ok(())
    }
}
