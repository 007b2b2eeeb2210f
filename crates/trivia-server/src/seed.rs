//! Setup-time seeding of categories and questions

use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use tracing::info;
use trivia_core::ports::TriviaStore;
use trivia_core::{CategoryId, NewQuestion};

const DEFAULT_SEED: &str = include_str!("../seed/default.yaml");

#[derive(Debug, Clone, Deserialize)]
pub struct SeedData {
    pub categories: Vec<String>,
    #[serde(default)]
    pub questions: Vec<SeedQuestion>,
}

/// A seed question refers to its category by name
#[derive(Debug, Clone, Deserialize)]
pub struct SeedQuestion {
    pub question: String,
    pub answer: String,
    pub category: String,
    pub difficulty: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedOutcome {
    /// The store already had categories
    Skipped,
    Applied { categories: usize, questions: usize },
}

impl SeedData {
    pub fn builtin() -> Result<Self> {
        serde_yaml::from_str(DEFAULT_SEED).context("Built-in seed is malformed")
    }

    /// Load a seed file, choosing JSON or YAML by extension
    pub fn from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read seed file {}", path.display()))?;

        let is_json = path.extension().map(|e| e == "json").unwrap_or(false);
        let data = if is_json {
            serde_json::from_str(&content)?
        } else {
            serde_yaml::from_str(&content)?
        };
        Ok(data)
    }

    /// Seed questions with category names swapped for the ids the store assigned
    pub fn resolve_questions(
        &self,
        ids: &HashMap<String, CategoryId>,
    ) -> Result<Vec<NewQuestion>> {
        self.questions
            .iter()
            .map(|q| -> Result<NewQuestion> {
                let category = *ids
                    .get(&q.category)
                    .with_context(|| format!("Category {:?} was not seeded", q.category))?;
                Ok(NewQuestion {
                    question: q.question.clone(),
                    answer: q.answer.clone(),
                    category,
                    difficulty: q.difficulty,
                })
            })
            .collect()
    }

    /// Every question must name one of the seeded categories
    fn check(&self) -> Result<()> {
        for q in &self.questions {
            if !self.categories.iter().any(|c| c == &q.category) {
                bail!(
                    "Seed question {:?} refers to unknown category {:?}",
                    q.question,
                    q.category
                );
            }
        }
        Ok(())
    }
}

/// A store that can take a whole seed in one all-or-nothing write
#[async_trait]
pub trait SeedTarget: TriviaStore {
    async fn load_seed(&self, seed: &SeedData) -> Result<()>;
}

/// Populate an empty store. A store that already has categories is left alone.
pub async fn apply<S: SeedTarget>(store: &S, seed: &SeedData) -> Result<SeedOutcome> {
    if !store.list_categories().await?.is_empty() {
        return Ok(SeedOutcome::Skipped);
    }
    seed.check()?;

    info!("Seeding empty store");
    store.load_seed(seed).await?;

    Ok(SeedOutcome::Applied {
        categories: seed.categories.len(),
        questions: seed.questions.len(),
    })
}
