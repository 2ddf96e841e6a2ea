use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use sea_orm::DbErr;
use serde::Serialize;

use crate::import::ImportError;

/// Structured error response returned by all endpoints on failure.
#[derive(Serialize, utoipa::ToSchema)]
pub struct ErrorBody {
    /// Machine-readable error code. One of: `VALIDATION_ERROR`, `NO_FILE`,
    /// `UNSUPPORTED_FORMAT`, `MISSING_COLUMNS`, `PROCESSING_ERROR`, `NOT_FOUND`,
    /// `CONFLICT`, `METHOD_NOT_ALLOWED`, `INTERNAL_ERROR`.
    #[schema(example = "VALIDATION_ERROR")]
    pub code: &'static str,
    /// Human-readable error description.
    #[schema(example = "roll_number is required")]
    pub message: String,
}

/// Application-level error type.
#[derive(Debug)]
pub enum AppError {
    Validation(String),
    /// Import request without a `file` part.
    NoFile,
    /// Batch-level import failure; no row was processed.
    Import(ImportError),
    NotFound(String),
    Conflict(String),
    MethodNotAllowed,
    Internal(String),
}

impl AppError {
    fn status_and_body(self) -> (StatusCode, ErrorBody) {
        match self {
            AppError::Validation(msg) => (
                StatusCode::BAD_REQUEST,
                ErrorBody {
                    code: "VALIDATION_ERROR",
                    message: msg,
                },
            ),
            AppError::NoFile => (
                StatusCode::BAD_REQUEST,
                ErrorBody {
                    code: "NO_FILE",
                    message: "No file uploaded".into(),
                },
            ),
            AppError::Import(err) => {
                let code = match &err {
                    ImportError::UnsupportedFormat => "UNSUPPORTED_FORMAT",
                    ImportError::MissingColumns(_) => "MISSING_COLUMNS",
                    ImportError::Processing(_) => "PROCESSING_ERROR",
                };
                tracing::warn!("Import rejected: {err}");
                (
                    StatusCode::BAD_REQUEST,
                    ErrorBody {
                        code,
                        message: err.to_string(),
                    },
                )
            }
            AppError::NotFound(msg) => (
                StatusCode::NOT_FOUND,
                ErrorBody {
                    code: "NOT_FOUND",
                    message: msg,
                },
            ),
            AppError::Conflict(msg) => (
                StatusCode::CONFLICT,
                ErrorBody {
                    code: "CONFLICT",
                    message: msg,
                },
            ),
            AppError::MethodNotAllowed => (
                StatusCode::METHOD_NOT_ALLOWED,
                ErrorBody {
                    code: "METHOD_NOT_ALLOWED",
                    message: "Method not allowed".into(),
                },
            ),
            AppError::Internal(detail) => {
                tracing::error!("Internal error: {}", detail);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorBody {
                        code: "INTERNAL_ERROR",
                        message: "An unexpected error occurred".into(),
                    },
                )
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = self.status_and_body();
        (status, Json(body)).into_response()
    }
}

impl From<DbErr> for AppError {
    fn from(err: DbErr) -> Self {
        AppError::Internal(err.to_string())
    }
}

impl From<ImportError> for AppError {
    fn from(err: ImportError) -> Self {
        AppError::Import(err)
    }
}
