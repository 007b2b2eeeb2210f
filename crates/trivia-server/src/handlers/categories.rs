//! Category handlers

use super::error::ApiError;
use crate::extractors::IdPath;
use crate::AppState;
use axum::{extract::State, Json};
use serde::Serialize;
use trivia_core::{category_map, Category, CategoryId, CategoryMap, Question};

#[derive(Debug, Serialize)]
pub struct CategoryListResponse {
    success: bool,
    categories: CategoryMap,
    total_categories: usize,
}

pub async fn list(State(state): State<AppState>) -> Result<Json<CategoryListResponse>, ApiError> {
    let categories = state.engine.list_categories().await?;

    Ok(Json(CategoryListResponse {
        success: true,
        total_categories: categories.len(),
        categories: category_map(&categories),
    }))
}

#[derive(Debug, Serialize)]
pub struct CategoryResponse {
    success: bool,
    category: Category,
}

pub async fn get(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> Result<Json<CategoryResponse>, ApiError> {
    let category = state.engine.get_category(id).await?;

    Ok(Json(CategoryResponse {
        success: true,
        category,
    }))
}

#[derive(Debug, Serialize)]
pub struct CategoryQuestionsResponse {
    success: bool,
    questions: Vec<Question>,
    total_questions: usize,
    current_category: CategoryId,
}

pub async fn questions(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> Result<Json<CategoryQuestionsResponse>, ApiError> {
    let result = state.engine.list_by_category(id).await?;

    Ok(Json(CategoryQuestionsResponse {
        success: true,
        questions: result.questions,
        total_questions: result.total_questions,
        current_category: result.category.id,
    }))
}
