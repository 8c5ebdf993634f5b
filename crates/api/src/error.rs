use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use codenote_core::error::CoreError;
use codenote_db::models::note::NOTE_CODE_CONSTRAINT;

/// PostgreSQL SQLSTATE for `check_violation`.
const CHECK_VIOLATION: &str = "23514";

const INTERNAL_MESSAGE: &str = "An internal error occurred";

/// Error type returned by every handler.
///
/// Renders as `{ "error": <message>, "code": <MACHINE_CODE> }`. Messages for
/// 5xx responses are replaced with a generic one; the cause is only logged.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Core(CoreError::NotFound { entity, code }) => (
                StatusCode::NOT_FOUND,
                "NOT_FOUND",
                format!("{entity} with code {code} not found"),
            ),
            AppError::Core(CoreError::Validation(msg)) => {
                (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
            }
            AppError::Core(CoreError::Conflict(msg)) => {
                (StatusCode::CONFLICT, "CONFLICT", msg.clone())
            }
            AppError::Core(CoreError::Internal(msg)) => {
                tracing::error!(error = %msg, "Internal core error");
                internal()
            }
            AppError::Database(err) => classify_sqlx_error(err),
        };

        (status, axum::Json(json!({ "error": message, "code": code }))).into_response()
    }
}

fn internal() -> (StatusCode, &'static str, String) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "INTERNAL_ERROR",
        INTERNAL_MESSAGE.to_string(),
    )
}

/// Map sqlx errors that escape the repositories onto responses.
///
/// - `RowNotFound`: 404.
/// - Unique violation of the note code: 409. Creation retries codes itself,
///   so this only surfaces from racing inserts under an explicit code.
/// - Check violation (malformed code that slipped past validation): 400.
/// - Pool exhaustion: 503.
/// - Anything else: 500.
fn classify_sqlx_error(err: &sqlx::Error) -> (StatusCode, &'static str, String) {
    match err {
        sqlx::Error::RowNotFound => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            "Resource not found".to_string(),
        ),
        _ if codenote_db::is_unique_violation(err, NOTE_CODE_CONSTRAINT) => (
            StatusCode::CONFLICT,
            "CONFLICT",
            "Note code is already taken".to_string(),
        ),
        sqlx::Error::Database(db_err) if db_err.code().as_deref() == Some(CHECK_VIOLATION) => (
            StatusCode::BAD_REQUEST,
            "VALIDATION_ERROR",
            format!(
                "Value violates constraint {}",
                db_err.constraint().unwrap_or("unknown")
            ),
        ),
        sqlx::Error::PoolTimedOut => {
            tracing::warn!("Database pool exhausted");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                "UNAVAILABLE",
                "Service temporarily unavailable, please retry".to_string(),
            )
        }
        other => {
            tracing::error!(error = %other, "Database error");
            internal()
        }
    }
}
