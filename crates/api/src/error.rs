use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use blog_core::asset::UploadRejection;
use blog_core::post::ValidationError;
use blog_core::repository::RepositoryError;
use blog_core::storage::StorageError;

/// API error type mapped to the admin UI's JSON error envelope.
///
/// Every rejection maps to a distinct `type` so the UI can render an
/// accurate message; backend faults are logged here and surfaced opaque.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("upload rejected: {0}")]
    UploadRejected(#[from] UploadRejection),

    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("unauthorized")]
    Unauthorized,

    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("database error: {0}")]
    Database(sqlx::Error),
}

impl From<RepositoryError> for ApiError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound => ApiError::NotFound("post not found".to_string()),
            RepositoryError::Database(err) => ApiError::Database(err),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_type, message, field) = match &self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "notFound", msg.clone(), None),
            ApiError::Validation(err) => (
                StatusCode::BAD_REQUEST,
                "validationError",
                err.to_string(),
                Some(err.field()),
            ),
            ApiError::UploadRejected(err) => {
                let error_type = match err {
                    UploadRejection::TooLarge { .. } => "tooLarge",
                    UploadRejection::UnsupportedType { .. } => "unsupportedType",
                };
                (StatusCode::BAD_REQUEST, error_type, err.to_string(), None)
            }
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "badRequest", msg.clone(), None),
            ApiError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                "unauthorized",
                "Editor credentials required".to_string(),
                None,
            ),
            ApiError::Storage(err) => {
                tracing::error!("Storage error: {err}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internalError",
                    "An internal error occurred".to_string(),
                    None,
                )
            }
            ApiError::Database(err) => {
                tracing::error!("Database error: {err}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internalError",
                    "An internal error occurred".to_string(),
                    None,
                )
            }
        };

        let mut error = json!({
            "type": error_type,
            "message": message,
            "statusCode": status.as_u16(),
        });
        if let Some(field) = field {
            error["field"] = json!(field);
        }

        (status, Json(json!({ "error": error }))).into_response()
    }
}

/// Convenience type alias for route handlers.
pub type ApiResult<T> = Result<T, ApiError>;
