//! In-memory store (no persistence)

use crate::seed::{SeedData, SeedTarget};
use async_trait::async_trait;
use dashmap::DashMap;
use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicI64, Ordering};
use tokio::sync::RwLock;
use trivia_core::ports::{CategoryStore, QuestionStore};
use trivia_core::{Category, CategoryId, NewQuestion, Question, QuestionId, Result};

/// Categories are write-once, so they live in a concurrent map. Questions sit
/// behind one lock so every listing sees a whole snapshot.
pub struct MemoryStore {
    categories: DashMap<CategoryId, Category>,
    next_category_id: AtomicI64,
    questions: RwLock<QuestionTable>,
}

struct QuestionTable {
    rows: BTreeMap<QuestionId, Question>,
    next_id: QuestionId,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            categories: DashMap::new(),
            next_category_id: AtomicI64::new(1),
            questions: RwLock::new(QuestionTable {
                rows: BTreeMap::new(),
                next_id: 1,
            }),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CategoryStore for MemoryStore {
    async fn get_category(&self, id: CategoryId) -> Result<Option<Category>> {
        Ok(self.categories.get(&id).map(|entry| entry.value().clone()))
    }

    async fn list_categories(&self) -> Result<Vec<Category>> {
        let mut categories: Vec<Category> = self
            .categories
            .iter()
            .map(|entry| entry.value().clone())
            .collect();
        categories.sort_by_key(|c| c.id);
        Ok(categories)
    }

    async fn insert_category(&self, kind: &str) -> Result<CategoryId> {
        let id = self.next_category_id.fetch_add(1, Ordering::SeqCst);
        self.categories.insert(id, Category::new(id, kind));
        Ok(id)
    }
}

#[async_trait]
impl QuestionStore for MemoryStore {
    async fn list_all(&self) -> Result<Vec<Question>> {
        let table = self.questions.read().await;
        Ok(table.rows.values().cloned().collect())
    }

    async fn insert(&self, question: &NewQuestion) -> Result<QuestionId> {
        let mut table = self.questions.write().await;
        let id = table.next_id;
        table.next_id += 1;
        table.rows.insert(id, question.clone().with_id(id));
        Ok(id)
    }

    async fn delete(&self, id: QuestionId) -> Result<bool> {
        let mut table = self.questions.write().await;
        Ok(table.rows.remove(&id).is_some())
    }
}

#[async_trait]
impl SeedTarget for MemoryStore {
    async fn load_seed(&self, seed: &SeedData) -> anyhow::Result<()> {
        let mut table = self.questions.write().await;

        let ids: HashMap<String, CategoryId> = seed
            .categories
            .iter()
            .map(|kind| {
                let id = self.next_category_id.fetch_add(1, Ordering::SeqCst);
                (kind.clone(), id)
            })
            .collect();
        // nothing is written until every category name resolves
        let questions = seed.resolve_questions(&ids)?;

        for (kind, id) in &ids {
            self.categories.insert(*id, Category::new(*id, kind.as_str()));
        }
        for question in questions {
            let id = table.next_id;
            table.next_id += 1;
            table.rows.insert(id, question.with_id(id));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_question(text: &str, category: CategoryId) -> NewQuestion {
        NewQuestion {
            question: text.to_string(),
            answer: "answer".to_string(),
            category,
            difficulty: 1,
        }
    }

    #[tokio::test]
    async fn test_categories_listed_in_id_order() {
        let store = MemoryStore::new();
        for kind in ["Science", "Art", "Geography"] {
            store.insert_category(kind).await.unwrap();
        }

        let listed = store.list_categories().await.unwrap();
        let ids: Vec<_> = listed.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(store.get_category(2).await.unwrap().unwrap().kind, "Art");
        assert_eq!(store.get_category(7).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_ids_are_never_reused() {
        let store = MemoryStore::new();
        let first = store.insert(&new_question("a", 1)).await.unwrap();
        let second = store.insert(&new_question("b", 1)).await.unwrap();
        assert!(store.delete(second).await.unwrap());
        let third = store.insert(&new_question("c", 1)).await.unwrap();

        assert_eq!((first, second, third), (1, 2, 3));
        let ids: Vec<_> = store.list_all().await.unwrap().iter().map(|q| q.id).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[tokio::test]
    async fn test_delete_missing_reports_false() {
        let store = MemoryStore::new();
        let id = store.insert(&new_question("a", 1)).await.unwrap();
        assert!(store.delete(id).await.unwrap());
        assert!(!store.delete(id).await.unwrap());
    }

    #[tokio::test]
    async fn test_failed_seed_load_writes_nothing() {
        let store = MemoryStore::new();
        let seed: SeedData = serde_yaml::from_str(
            r#"
categories: [Science, Art]
questions:
  - {question: "Q1", answer: "A", category: Science, difficulty: 1}
  - {question: "Q2", answer: "A", category: Sports, difficulty: 1}
"#,
        )
        .unwrap();

        assert!(store.load_seed(&seed).await.is_err());
        assert!(store.list_categories().await.unwrap().is_empty());
        assert!(store.list_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_concurrent_inserts_get_distinct_ids() {
        let store = std::sync::Arc::new(MemoryStore::new());
        let handles: Vec<_> = (0..16)
            .map(|i| {
                let store = store.clone();
                tokio::spawn(async move { store.insert(&new_question(&format!("q{}", i), 1)).await })
            })
            .collect();

        let mut ids = Vec::new();
        for handle in handles {
            ids.push(handle.await.unwrap().unwrap());
        }
        ids.sort_unstable();
        assert_eq!(ids, (1..=16).collect::<Vec<_>>());
        assert_eq!(store.list_all().await.unwrap().len(), 16);
    }
}
