use serde::Serialize;
use utoipa::ToSchema;

use crate::import::{ImportSummary, RowError};

#[derive(Serialize, ToSchema)]
pub struct ImportResponse {
    #[schema(example = "Successfully imported 2 students. Failed to import 1 students.")]
    pub message: String,
    pub imported: usize,
    pub failed: usize,
    pub errors: Vec<RowErrorResponse>,
}

#[derive(Serialize, ToSchema)]
pub struct RowErrorResponse {
    /// Spreadsheet row number; the header is row 1.
    #[schema(example = 3)]
    pub row: usize,
    #[schema(example = "Student with roll number R999 not found")]
    pub message: String,
}

impl From<RowError> for RowErrorResponse {
    fn from(e: RowError) -> Self {
        Self {
            row: e.row,
            message: e.message,
        }
    }
}

impl From<ImportSummary> for ImportResponse {
    fn from(summary: ImportSummary) -> Self {
        Self {
            message: summary.message(),
            imported: summary.imported,
            failed: summary.failed,
            errors: summary.errors.into_iter().map(Into::into).collect(),
        }
    }
}
