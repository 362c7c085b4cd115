use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use pawhaven_core::error::CoreError;
use pawhaven_db::repositories::CommandError;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and adds HTTP-specific variants.
/// Implements [`IntoResponse`] to produce the platform's
/// `{ "success": false, "errors": [...] }` envelope.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `pawhaven_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Declarative request validation failed; one message per offending field.
    #[error("Validation failed")]
    Validation(Vec<String>),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl From<CommandError> for AppError {
    fn from(err: CommandError) -> Self {
        match err {
            CommandError::Domain(core) => AppError::Core(core),
            CommandError::Db(db) => AppError::Database(db),
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let messages = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errs)| {
                errs.iter().map(move |e| match &e.message {
                    Some(msg) => format!("{field}: {msg}"),
                    None => format!("{field}: invalid value"),
                })
            })
            .collect();
        AppError::Validation(messages)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, errors) = match &self {
            AppError::Core(core) => match core {
                CoreError::NotFound { entity, id } => (
                    StatusCode::NOT_FOUND,
                    vec![format!("{entity} with id {id} not found")],
                ),
                CoreError::Validation(msg) => (StatusCode::BAD_REQUEST, vec![msg.clone()]),
                CoreError::InvalidState(msg) => (StatusCode::BAD_REQUEST, vec![msg.clone()]),
                // The platform convention maps Conflict to 400, not 409.
                CoreError::Conflict(msg) => (StatusCode::BAD_REQUEST, vec![msg.clone()]),
                CoreError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, vec![msg.clone()]),
                CoreError::Forbidden(msg) => (StatusCode::FORBIDDEN, vec![msg.clone()]),
                CoreError::Internal(msg) => {
                    tracing::error!(error = %msg, "Internal core error");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        vec!["An internal error occurred".to_string()],
                    )
                }
            },

            AppError::Database(err) => classify_sqlx_error(err),

            AppError::Validation(messages) => (StatusCode::BAD_REQUEST, messages.clone()),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, vec![msg.clone()]),
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    vec!["An internal error occurred".to_string()],
                )
            }
        };

        let body = json!({
            "success": false,
            "errors": errors,
        });

        (status, axum::Json(body)).into_response()
    }
}

/// Classify a sqlx error into an HTTP status and error messages.
///
/// - `RowNotFound` maps to 404.
/// - Unique constraint violations (constraint name starting with `uq_`) map
///   to 400, matching the Conflict convention.
/// - Everything else maps to 500 with a sanitized message.
fn classify_sqlx_error(err: &sqlx::Error) -> (StatusCode, Vec<String>) {
    match err {
        sqlx::Error::RowNotFound => {
            (StatusCode::NOT_FOUND, vec!["Resource not found".to_string()])
        }
        sqlx::Error::Database(db_err) => {
            // PostgreSQL unique constraint violation: error code 23505
            if db_err.code().as_deref() == Some("23505") {
                let constraint = db_err.constraint().unwrap_or("unknown");
                if constraint.starts_with("uq_") {
                    return (
                        StatusCode::BAD_REQUEST,
                        vec![format!("Duplicate value violates unique constraint: {constraint}")],
                    );
                }
            }
            tracing::error!(error = %db_err, "Database error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                vec!["An internal error occurred".to_string()],
            )
        }
        other => {
            tracing::error!(error = %other, "Database error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                vec!["An internal error occurred".to_string()],
            )
        }
    }
}
