//! Question handlers

use super::error::ApiError;
use crate::extractors::{IdPath, JsonBody};
use crate::AppState;
use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use trivia_core::{CategoryId, CategoryMap, Page, Question, QuestionDraft, QuestionId};

#[derive(Debug, Deserialize)]
pub struct PageParams {
    page: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct QuestionListResponse {
    success: bool,
    questions: Vec<Question>,
    total_questions: usize,
    current_category: Option<CategoryId>,
    categories: CategoryMap,
}

pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<PageParams>,
) -> Result<Json<QuestionListResponse>, ApiError> {
    let page = Page::parse(params.page.as_deref());
    let result = state.engine.list_questions(page).await?;

    Ok(Json(QuestionListResponse {
        success: true,
        questions: result.questions,
        total_questions: result.total_questions,
        current_category: None,
        categories: result.categories,
    }))
}

#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    #[serde(rename = "searchTerm")]
    search_term: String,
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    success: bool,
    questions: Vec<Question>,
    total_questions: usize,
    current_category: Option<CategoryId>,
}

pub async fn search(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<SearchRequest>,
) -> Result<Json<SearchResponse>, ApiError> {
    run_search(&state, &req.search_term).await.map(Json)
}

async fn run_search(state: &AppState, term: &str) -> Result<SearchResponse, ApiError> {
    let result = state.engine.search_questions(term).await?;

    Ok(SearchResponse {
        success: true,
        questions: result.questions,
        total_questions: result.total_questions,
        current_category: None,
    })
}

/// `POST /questions` carries either a search term or a new question
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum QuestionsPayload {
    Search(SearchRequest),
    Create(QuestionDraft),
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum QuestionsPostResponse {
    Search(SearchResponse),
    Created { success: bool, created: QuestionId },
}

pub async fn create_or_search(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<QuestionsPayload>,
) -> Result<Json<QuestionsPostResponse>, ApiError> {
    match payload {
        QuestionsPayload::Search(req) => {
            let response = run_search(&state, &req.search_term).await?;
            Ok(Json(QuestionsPostResponse::Search(response)))
        }
        QuestionsPayload::Create(draft) => {
            let id = state.engine.create_question(&draft).await?;
            Ok(Json(QuestionsPostResponse::Created {
                success: true,
                created: id,
            }))
        }
    }
}

#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    success: bool,
    deleted: QuestionId,
}

pub async fn delete(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> Result<Json<DeleteResponse>, ApiError> {
    state.engine.delete_question(id).await?;

    Ok(Json(DeleteResponse {
        success: true,
        deleted: id,
    }))
}
