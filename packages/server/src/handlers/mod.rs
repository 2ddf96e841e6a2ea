pub mod import;
pub mod result;
pub mod student;

use sea_orm::{DbErr, SqlErr};

use crate::error::AppError;

/// Fallback for known paths hit with an unsupported method.
pub async fn method_not_allowed() -> AppError {
    AppError::MethodNotAllowed
}

/// Fallback for unknown paths.
pub async fn not_found() -> AppError {
    AppError::NotFound("Route not found".into())
}

/// Map a unique-constraint violation to `409 Conflict`, anything else to `500`.
fn conflict_on_duplicate(err: DbErr, message: impl FnOnce() -> String) -> AppError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => AppError::Conflict(message()),
        _ => err.into(),
    }
}
