use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use blazeink_core::{StorageError, ValidationError};
use serde_json::json;

use crate::crew::GenerationError;

/// API error type that maps to JSON error responses.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("bad request: {0}")]
    BadRequest(#[from] ValidationError),

    /// Body or query string that could not be parsed into the expected shape.
    #[error("malformed request: {0}")]
    Malformed(String),

    #[error("generation failed: {0}")]
    Generation(#[from] GenerationError),

    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_type, message) = match &self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "notFound", msg.clone()),
            ApiError::BadRequest(err) => (StatusCode::BAD_REQUEST, "badRequest", err.to_string()),
            ApiError::Malformed(msg) => (StatusCode::BAD_REQUEST, "badRequest", msg.clone()),
            ApiError::Generation(err) => {
                tracing::error!("Content generation failed: {err}");
                (
                    StatusCode::BAD_GATEWAY,
                    "generationFailed",
                    "Content generation failed".to_string(),
                )
            }
            ApiError::Storage(StorageError::Duplicate(id)) => (
                StatusCode::CONFLICT,
                "conflict",
                format!("content {id} already exists"),
            ),
            ApiError::Storage(err) => {
                tracing::error!("Storage error: {err}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internalError",
                    "An internal error occurred".to_string(),
                )
            }
        };

        let body = json!({
            "error": {
                "type": error_type,
                "message": message,
                "statusCode": status.as_u16(),
            }
        });

        (status, Json(body)).into_response()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Malformed(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::Malformed(rejection.body_text())
    }
}

/// Convenience type alias for route handlers.
pub type ApiResult<T> = Result<T, ApiError>;
