use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use storynest_core::error::CoreError;
use storynest_pipeline::PipelineError;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and adds HTTP-specific variants.
/// Implements [`IntoResponse`] to produce consistent `{ "error": ... }`
/// JSON bodies; the generation-related messages are part of the wire
/// contract and rendered verbatim.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `storynest_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A failure in the story-generation pipeline.
    #[error(transparent)]
    Generation(#[from] PipelineError),

    /// A required upstream credential is absent.
    #[error("{0}")]
    Config(&'static str),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AppError::Core(CoreError::Validation(errors.to_string()))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::NotFound { entity, id } => (
                    StatusCode::NOT_FOUND,
                    format!("{entity} with id {id} not found"),
                ),
                CoreError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
                CoreError::Conflict(msg) => (StatusCode::CONFLICT, msg.clone()),
                CoreError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg.clone()),
                CoreError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg.clone()),
                CoreError::Internal(msg) => {
                    tracing::error!(error = %msg, "Internal core error");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "An internal error occurred".to_string(),
                    )
                }
            },

            // --- Database errors ---
            AppError::Database(err) => classify_sqlx_error(err),

            // --- Generation pipeline errors ---
            AppError::Generation(err) => {
                let message = match err {
                    PipelineError::UnparseableResponse | PipelineError::InvalidStoryFormat => {
                        err.to_string()
                    }
                    PipelineError::TextService(cause) => {
                        tracing::error!(error = %cause, "Text generation failed");
                        "Failed to generate story. Please try again.".to_string()
                    }
                };
                (StatusCode::INTERNAL_SERVER_ERROR, message)
            }

            // --- Missing credentials ---
            AppError::Config(msg) => {
                tracing::error!(error = %msg, "Missing upstream configuration");
                (StatusCode::INTERNAL_SERVER_ERROR, (*msg).to_string())
            }

            // --- HTTP-specific errors ---
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal error occurred".to_string(),
                )
            }
        };

        let body = json!({ "error": message });

        (status, axum::Json(body)).into_response()
    }
}

/// Classify a sqlx error into an HTTP status and message.
///
/// - `RowNotFound` maps to 404.
/// - Unique constraint violations (error code 23505) map to 409.
/// - Everything else maps to 500 with a sanitized message.
fn classify_sqlx_error(err: &sqlx::Error) -> (StatusCode, String) {
    match err {
        sqlx::Error::RowNotFound => (StatusCode::NOT_FOUND, "Resource not found".to_string()),
        sqlx::Error::Database(db_err) => {
            if db_err.code().as_deref() == Some("23505") {
                return (
                    StatusCode::CONFLICT,
                    "Duplicate value violates a unique constraint".to_string(),
                );
            }
            tracing::error!(error = %db_err, "Database error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "An internal error occurred".to_string(),
            )
        }
        other => {
            tracing::error!(error = %other, "Database error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "An internal error occurred".to_string(),
            )
        }
    }
}
