//! Quiz handler

use super::error::ApiError;
use crate::extractors::JsonBody;
use crate::AppState;
use axum::{extract::State, Json};
use serde::Serialize;
use trivia_core::{Question, QuizCriteria, QuizRequest};

#[derive(Debug, Serialize)]
pub struct QuizResponse {
    success: bool,
    /// `null` once every eligible question has been played
    question: Option<Question>,
}

pub async fn next_question(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<QuizRequest>,
) -> Result<Json<QuizResponse>, ApiError> {
    let criteria =
        QuizCriteria::try_from(&req).map_err(|e| ApiError::BadRequest(e.to_string()))?;

    let question = state.engine.select_quiz_question(&criteria).await?;

    Ok(Json(QuizResponse {
        success: true,
        question,
    }))
}
