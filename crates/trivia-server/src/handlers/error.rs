//! API error type with automatic HTTP status mapping
//!
//! Every failure is rendered as `{"success": false, "error": <status>, "message": ...}`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use trivia_core::TriviaError;

#[derive(Debug)]
pub enum ApiError {
    /// Malformed or missing request body (400)
    BadRequest(String),

    /// Unknown category, question or route (404)
    NotFound(String),

    /// Missing required field on create (422)
    Unprocessable(String),

    /// Store failure (500, logged)
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Unprocessable(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match &self {
            Self::BadRequest(detail) => json!({
                "success": false,
                "error": status.as_u16(),
                "message": "Bad request.",
                "detail": detail,
            }),
            Self::NotFound(detail) => json!({
                "success": false,
                "error": status.as_u16(),
                "message": "Not found.",
                "detail": detail,
            }),
            Self::Unprocessable(detail) => json!({
                "success": false,
                "error": status.as_u16(),
                "message": "We couldn't process your request.",
                "detail": detail,
            }),
            Self::Internal(detail) => {
                // Log the actual error, return generic message
                tracing::error!("Internal error: {}", detail);
                json!({
                    "success": false,
                    "error": status.as_u16(),
                    "message": "Something went wrong.",
                })
            }
        };

        (status, Json(body)).into_response()
    }
}

impl From<TriviaError> for ApiError {
    fn from(e: TriviaError) -> Self {
        match e {
            TriviaError::Validation(_) => Self::Unprocessable(e.to_string()),
            TriviaError::NotFound { .. } => Self::NotFound(e.to_string()),
            TriviaError::Store(_) => Self::Internal(e.to_string()),
        }
    }
}
