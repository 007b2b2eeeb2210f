//! SQLite database layer (embedded, no external dependencies)

use crate::seed::{SeedData, SeedTarget};
use anyhow::{Context, Result};
use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::collections::HashMap;
use std::time::Duration;
use trivia_core::ports::{CategoryStore, QuestionStore};
use trivia_core::{Category, CategoryId, NewQuestion, Question, QuestionId, TriviaError};

pub struct Database {
    pool: SqlitePool,
}

impl Database {
    pub async fn new(database_path: &str, acquire_timeout: Duration) -> Result<Self> {
        tracing::info!("Opening SQLite database at: {}", database_path);

        // Create parent directory if needed
        if let Some(parent) = std::path::Path::new(database_path).parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await.with_context(|| {
                    format!("Failed to create database directory: {}", parent.display())
                })?;
            }
        }

        let options = SqliteConnectOptions::new()
            .filename(database_path)
            .create_if_missing(true)
            .journal_mode(sqlx::sqlite::SqliteJournalMode::Wal)
            .synchronous(sqlx::sqlite::SqliteSynchronous::Normal)
            .busy_timeout(acquire_timeout);

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .acquire_timeout(acquire_timeout)
            .connect_with(options)
            .await
            .with_context(|| {
                format!("Failed to connect to SQLite database at: {}", database_path)
            })?;

        tracing::info!("SQLite connection established, running migrations...");

        Self::run_migrations(&pool)
            .await
            .context("Failed to run database migrations")?;

        tracing::info!("Database initialization complete");

        Ok(Self { pool })
    }

    /// Private in-memory database for tests.
    ///
    /// Every SQLite `:memory:` connection is its own database, so the pool is
    /// pinned to a single connection that is never recycled.
    #[cfg(test)]
    pub async fn in_memory() -> Result<Self> {
        let options = <SqliteConnectOptions as std::str::FromStr>::from_str("sqlite::memory:")?;
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await
            .context("Failed to open in-memory SQLite database")?;

        Self::run_migrations(&pool).await?;

        Ok(Self { pool })
    }

    async fn run_migrations(pool: &SqlitePool) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS categories (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                type TEXT NOT NULL
            )
            "#,
        )
        .execute(pool)
        .await?;

        // AUTOINCREMENT keeps deleted ids from being handed out again
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS questions (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                question TEXT NOT NULL,
                answer TEXT NOT NULL,
                category INTEGER NOT NULL,
                difficulty INTEGER NOT NULL
            )
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            r#"
            CREATE INDEX IF NOT EXISTS idx_questions_category ON questions (category)
            "#,
        )
        .execute(pool)
        .await?;

        Ok(())
    }
}

#[async_trait]
impl CategoryStore for Database {
    async fn get_category(&self, id: CategoryId) -> trivia_core::Result<Option<Category>> {
        let row: Option<CategoryRow> = sqlx::query_as(
            r#"
            SELECT id, type AS kind FROM categories WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(TriviaError::store)?;

        Ok(row.map(|r| r.into()))
    }

    async fn list_categories(&self) -> trivia_core::Result<Vec<Category>> {
        let rows: Vec<CategoryRow> = sqlx::query_as(
            r#"
            SELECT id, type AS kind FROM categories ORDER BY id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(TriviaError::store)?;

        Ok(rows.into_iter().map(|r| r.into()).collect())
    }

    async fn insert_category(&self, kind: &str) -> trivia_core::Result<CategoryId> {
        let result = sqlx::query(
            r#"
            INSERT INTO categories (type) VALUES (?1)
            "#,
        )
        .bind(kind)
        .execute(&self.pool)
        .await
        .map_err(TriviaError::store)?;

        Ok(result.last_insert_rowid())
    }
}

#[async_trait]
impl QuestionStore for Database {
    async fn list_all(&self) -> trivia_core::Result<Vec<Question>> {
        let rows: Vec<QuestionRow> = sqlx::query_as(
            r#"
            SELECT id, question, answer, category, difficulty
            FROM questions ORDER BY id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(TriviaError::store)?;

        Ok(rows.into_iter().map(|r| r.into()).collect())
    }

    async fn insert(&self, question: &NewQuestion) -> trivia_core::Result<QuestionId> {
        let mut tx = self.pool.begin().await.map_err(TriviaError::store)?;

        let result = sqlx::query(
            r#"
            INSERT INTO questions (question, answer, category, difficulty)
            VALUES (?1, ?2, ?3, ?4)
            "#,
        )
        .bind(&question.question)
        .bind(&question.answer)
        .bind(question.category)
        .bind(question.difficulty)
        .execute(&mut *tx)
        .await
        .map_err(TriviaError::store)?;

        tx.commit().await.map_err(TriviaError::store)?;

        Ok(result.last_insert_rowid())
    }

    async fn delete(&self, id: QuestionId) -> trivia_core::Result<bool> {
        let mut tx = self.pool.begin().await.map_err(TriviaError::store)?;

        let result = sqlx::query(
            r#"
            DELETE FROM questions WHERE id = ?1
            "#,
        )
        .bind(id)
        .execute(&mut *tx)
        .await
        .map_err(TriviaError::store)?;

        tx.commit().await.map_err(TriviaError::store)?;

        Ok(result.rows_affected() == 1)
    }
}

#[async_trait]
impl SeedTarget for Database {
    async fn load_seed(&self, seed: &SeedData) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        let mut ids = HashMap::new();
        for kind in &seed.categories {
            let result = sqlx::query(
                r#"
                INSERT INTO categories (type) VALUES (?1)
                "#,
            )
            .bind(kind)
            .execute(&mut *tx)
            .await?;
            ids.insert(kind.clone(), result.last_insert_rowid());
        }

        for question in seed.resolve_questions(&ids)? {
            sqlx::query(
                r#"
                INSERT INTO questions (question, answer, category, difficulty)
                VALUES (?1, ?2, ?3, ?4)
                "#,
            )
            .bind(&question.question)
            .bind(&question.answer)
            .bind(question.category)
            .bind(question.difficulty)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await.context("Failed to commit seed")?;
        Ok(())
    }
}

// Helper structs for sqlx query_as
#[derive(sqlx::FromRow)]
struct CategoryRow {
    id: i64,
    kind: String,
}

impl From<CategoryRow> for Category {
    fn from(r: CategoryRow) -> Self {
        Category::new(r.id, r.kind)
    }
}

#[derive(sqlx::FromRow)]
struct QuestionRow {
    id: i64,
    question: String,
    answer: String,
    category: i64,
    difficulty: i64,
}

impl From<QuestionRow> for Question {
    fn from(r: QuestionRow) -> Self {
        Question {
            id: r.id,
            question: r.question,
            answer: r.answer,
            category: r.category,
            difficulty: r.difficulty,
        }
    }
}
