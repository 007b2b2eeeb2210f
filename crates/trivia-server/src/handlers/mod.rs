//! HTTP handlers

pub mod categories;
pub mod error;
pub mod health;
pub mod questions;
pub mod quizzes;

pub use error::ApiError;
pub use health::health;

/// Fallback for unknown routes
pub async fn not_found() -> ApiError {
    ApiError::NotFound("no such route".to_string())
}

#[cfg(test)]
mod tests {
    use crate::seed::{self, SeedData};
    use crate::storage::MemoryStore;
    use crate::{build_router, AppState};
    use async_trait::async_trait;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use axum::Router;
    use serde_json::{json, Value};
    use std::sync::Arc;
    use tower::ServiceExt;
    use trivia_core::ports::{CategoryStore, QuestionStore};
    use trivia_core::{
        Category, CategoryId, NewQuestion, Question, QuestionId, QueryEngine, TriviaError,
    };

    const SEED: &str = r#"
categories: [Science, Art, History]
questions:
  - {question: "What is the heaviest organ in the human body?", answer: "The Liver", category: Science, difficulty: 4}
  - {question: "Who discovered penicillin?", answer: "Alexander Fleming", category: Science, difficulty: 3}
  - {question: "La Giaconda is better known as what?", answer: "Mona Lisa", category: Art, difficulty: 3}
"#;

    async fn test_app() -> Router {
        let store = Arc::new(MemoryStore::new());
        let seed: SeedData = serde_yaml::from_str(SEED).unwrap();
        seed::apply(store.as_ref(), &seed).await.unwrap();
        build_router(AppState {
            engine: Arc::new(QueryEngine::new(store)),
        })
    }

    async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn delete(uri: &str) -> Request<Body> {
        Request::builder()
            .method("DELETE")
            .uri(uri)
            .body(Body::empty())
            .unwrap()
    }

    fn question_ids(body: &Value) -> Vec<i64> {
        body["questions"]
            .as_array()
            .unwrap()
            .iter()
            .map(|q| q["id"].as_i64().unwrap())
            .collect()
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let app = test_app().await;
        let (status, body) = send(&app, get("/health")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn test_get_categories() {
        let app = test_app().await;
        let (status, body) = send(&app, get("/categories")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(body["total_categories"], 3);
        assert_eq!(body["categories"], json!({"1": "Science", "2": "Art", "3": "History"}));
    }

    #[tokio::test]
    async fn test_get_category_not_found() {
        let app = test_app().await;
        let (status, body) = send(&app, get("/categories/8")).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], 404);
    }

    #[tokio::test]
    async fn test_get_questions() {
        let app = test_app().await;
        let (status, body) = send(&app, get("/questions")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(body["total_questions"], 3);
        assert_eq!(question_ids(&body), vec![1, 2, 3]);
        assert_eq!(body["current_category"], Value::Null);
        assert_eq!(body["categories"]["2"], "Art");
    }

    #[tokio::test]
    async fn test_get_questions_beyond_last_page() {
        let app = test_app().await;
        let (status, body) = send(&app, get("/questions?page=1000")).await;

        assert_eq!(status, StatusCode::OK);
        assert!(question_ids(&body).is_empty());
        assert_eq!(body["total_questions"], 3);

        // garbage falls back to the first page
        let (_, body) = send(&app, get("/questions?page=abc")).await;
        assert_eq!(question_ids(&body), vec![1, 2, 3]);

        // larger than any 32-bit page number, still past the end
        let (status, body) = send(&app, get("/questions?page=4294967296")).await;
        assert_eq!(status, StatusCode::OK);
        assert!(question_ids(&body).is_empty());
        assert_eq!(body["total_questions"], 3);
    }

    #[tokio::test]
    async fn test_get_questions_by_category() {
        let app = test_app().await;

        let (status, body) = send(&app, get("/categories/1/questions")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(question_ids(&body), vec![1, 2]);
        assert_eq!(body["total_questions"], 2);
        assert_eq!(body["current_category"], 1);

        let (status, body) = send(&app, get("/categories/3/questions")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["total_questions"], 0);

        let (status, body) = send(&app, get("/categories/0/questions")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["success"], false);
    }

    #[tokio::test]
    async fn test_search_questions() {
        let app = test_app().await;

        let (status, body) = send(
            &app,
            post_json("/questions/search", json!({"searchTerm": "PENICILLIN"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(question_ids(&body), vec![2]);
        assert_eq!(body["total_questions"], 1);

        // the same search through POST /questions
        let (status, body) =
            send(&app, post_json("/questions", json!({"searchTerm": "what"}))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(question_ids(&body), vec![1, 3]);
    }

    #[tokio::test]
    async fn test_search_without_term_is_bad_request() {
        let app = test_app().await;
        let (status, body) = send(&app, post_json("/questions/search", json!({}))).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);
    }

    #[tokio::test]
    async fn test_create_list_delete_question() {
        let app = test_app().await;

        let (status, body) = send(
            &app,
            post_json(
                "/questions",
                json!({"question": "Q", "answer": "A", "category": "2", "difficulty": 3}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        let id = body["created"].as_i64().unwrap();

        let (_, body) = send(&app, get("/questions?page=1")).await;
        assert!(question_ids(&body).contains(&id));
        let created = body["questions"]
            .as_array()
            .unwrap()
            .iter()
            .find(|q| q["id"] == id)
            .unwrap();
        assert_eq!(created["category"], 2);

        let (status, body) = send(&app, delete(&format!("/questions/{}", id))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["deleted"], id);

        let (status, _) = send(&app, delete(&format!("/questions/{}", id))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (_, body) = send(&app, get("/questions")).await;
        assert!(!question_ids(&body).contains(&id));
    }

    #[tokio::test]
    async fn test_create_missing_fields_is_unprocessable() {
        let app = test_app().await;

        let (status, body) = send(&app, post_json("/questions", json!({}))).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], 422);

        let (status, _) = send(
            &app,
            post_json(
                "/questions",
                json!({"question": "Q", "answer": "", "category": 1, "difficulty": 1}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_malformed_body_is_bad_request() {
        let app = test_app().await;
        let request = Request::builder()
            .method("POST")
            .uri("/questions")
            .header("content-type", "application/json")
            .body(Body::from("{not json"))
            .unwrap();

        let (status, body) = send(&app, request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], 400);
    }

    #[tokio::test]
    async fn test_quiz_excludes_previous_questions() {
        let app = test_app().await;

        let (status, body) = send(
            &app,
            post_json(
                "/quizzes",
                json!({"previous_questions": [1], "quiz_category": {"type": "Science", "id": "1"}}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(body["question"]["id"], 2);
        assert_eq!(body["question"]["category"], 1);
    }

    #[tokio::test]
    async fn test_quiz_difficulty_as_string() {
        let app = test_app().await;

        let (status, body) = send(
            &app,
            post_json(
                "/quizzes",
                json!({"previous_questions": [], "quiz_category": {"id": 1}, "difficulty": "4"}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["question"]["id"], 1);
        assert_eq!(body["question"]["difficulty"], 4);
    }

    #[tokio::test]
    async fn test_quiz_exhausted_returns_null_question() {
        let app = test_app().await;

        let (status, body) = send(
            &app,
            post_json(
                "/quizzes",
                json!({"previous_questions": [1, 2, 3], "quiz_category": {"id": "all"}}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(body["question"], Value::Null);
    }

    #[tokio::test]
    async fn test_quiz_errors() {
        let app = test_app().await;

        let (status, _) = send(
            &app,
            post_json(
                "/quizzes",
                json!({"previous_questions": [], "quiz_category": {"id": 42}}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = send(&app, post_json("/quizzes", json!({}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = send(
            &app,
            post_json(
                "/quizzes",
                json!({"previous_questions": [], "quiz_category": {"id": "science"}}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_unknown_route_uses_error_envelope() {
        let app = test_app().await;
        let (status, body) = send(&app, get("/search")).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["success"], false);

        let (status, _) = send(&app, delete("/questions/abc")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    struct BrokenStore;

    #[async_trait]
    impl CategoryStore for BrokenStore {
        async fn get_category(&self, _id: CategoryId) -> trivia_core::Result<Option<Category>> {
            Err(TriviaError::store("connection reset"))
        }

        async fn list_categories(&self) -> trivia_core::Result<Vec<Category>> {
            Err(TriviaError::store("connection reset"))
        }

        async fn insert_category(&self, _kind: &str) -> trivia_core::Result<CategoryId> {
            Err(TriviaError::store("connection reset"))
        }
    }

    #[async_trait]
    impl QuestionStore for BrokenStore {
        async fn list_all(&self) -> trivia_core::Result<Vec<Question>> {
            Err(TriviaError::store("connection reset"))
        }

        async fn insert(&self, _question: &NewQuestion) -> trivia_core::Result<QuestionId> {
            Err(TriviaError::store("connection reset"))
        }

        async fn delete(&self, _id: QuestionId) -> trivia_core::Result<bool> {
            Err(TriviaError::store("connection reset"))
        }
    }

    #[tokio::test]
    async fn test_store_failure_is_internal_error() {
        let app = build_router(AppState {
            engine: Arc::new(QueryEngine::new(Arc::new(BrokenStore))),
        });

        let (status, body) = send(&app, get("/questions")).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["success"], false);
        assert_eq!(body["message"], "Something went wrong.");

        let (status, _) = send(
            &app,
            post_json(
                "/questions",
                json!({"question": "Q", "answer": "A", "category": 1, "difficulty": 1}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    }
}
