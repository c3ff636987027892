//! HTTP error mapping.
//!
//! Handlers return [`AppResult`]; every failure funnels through
//! [`AppError::into_response`] so clients always see the same
//! `{ "error", "code" }` JSON shape regardless of which layer failed.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kanri_core::error::CoreError;
use serde_json::json;

/// Error type for HTTP handlers: domain errors plus the sqlx failures the
/// repositories surface.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A malformed request that never reached the domain layer.
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Core(core) => core_to_http(core),
            AppError::Database(err) => classify_sqlx_error(err),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal error occurred".to_string(),
                )
            }
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

fn core_to_http(core: &CoreError) -> (StatusCode, &'static str, String) {
    match core {
        CoreError::NotFound { entity, key } => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            format!("{entity} {key} not found"),
        ),
        CoreError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
        CoreError::Conflict(msg) => (StatusCode::CONFLICT, "CONFLICT", msg.clone()),
        CoreError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg.clone()),
        CoreError::Forbidden(msg) => (StatusCode::FORBIDDEN, "FORBIDDEN", msg.clone()),
        CoreError::Internal(msg) => {
            tracing::error!(error = %msg, "Internal core error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                "An internal error occurred".to_string(),
            )
        }
    }
}

/// Classify a sqlx error into an HTTP status, error code, and message.
///
/// `RowNotFound` is a 404. A serialization failure (SQLSTATE 40001) reaching
/// here already survived the repositories' one-shot retry, so it becomes a
/// 409 asking the caller to retry; a unique-constraint violation on one of
/// our `uq_` indexes is also a 409. Everything else is a sanitized 500.
fn classify_sqlx_error(err: &sqlx::Error) -> (StatusCode, &'static str, String) {
    match err {
        sqlx::Error::RowNotFound => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            "Resource not found".to_string(),
        ),
        sqlx::Error::Database(db_err) => match db_err.code().as_deref() {
            Some("40001") => (
                StatusCode::CONFLICT,
                "CONFLICT",
                "Concurrent modification, please retry".to_string(),
            ),
            Some("23505") if db_err.constraint().is_some_and(|c| c.starts_with("uq_")) => {
                let constraint = db_err.constraint().unwrap_or("unknown");
                (
                    StatusCode::CONFLICT,
                    "CONFLICT",
                    format!("Duplicate value violates unique constraint: {constraint}"),
                )
            }
            _ => {
                tracing::error!(error = %db_err, "Database error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal error occurred".to_string(),
                )
            }
        },
        other => {
            tracing::error!(error = %other, "Database error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                "An internal error occurred".to_string(),
            )
        }
    }
}
