//! Bulk import of students and results from uploaded spreadsheets.
//!
//! An import is validated at the header level first: a missing required
//! column rejects the whole file before any row is touched. After that every
//! row is processed on its own, and a failing row is recorded in the
//! [`ImportSummary`] without stopping the rows after it.

mod result;
mod student;

use sea_orm::DbErr;
use thiserror::Error;

use crate::tabular::{Row, Table};

pub use result::{RESULT_COLUMNS, import_results};
pub use student::{STUDENT_COLUMNS, import_students};

/// Batch-level failure. Nothing was written when one of these is returned.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ImportError {
    #[error("Unsupported file format. Please upload a CSV or Excel file.")]
    UnsupportedFormat,

    #[error("Missing required columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    #[error("Error processing file: {0}")]
    Processing(String),
}

/// A single rejected row, numbered by its position in the uploaded file
/// (the header is row 1). Skipped blank rows still count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowError {
    pub row: usize,
    pub message: String,
}

/// Why one row could not be imported.
#[derive(Debug, Error)]
pub(crate) enum RowFailure {
    #[error("Student with roll number {0} not found")]
    StudentNotFound(String),

    #[error("{0}")]
    Invalid(String),

    #[error(transparent)]
    Db(#[from] DbErr),
}

/// Outcome of an import that passed header validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportSummary {
    noun: &'static str,
    pub imported: usize,
    pub failed: usize,
    pub errors: Vec<RowError>,
}

impl ImportSummary {
    fn new(noun: &'static str) -> Self {
        Self {
            noun,
            imported: 0,
            failed: 0,
            errors: Vec::new(),
        }
    }

    fn record_success(&mut self) {
        self.imported += 1;
    }

    fn record_failure(&mut self, row: usize, failure: RowFailure) {
        tracing::debug!(row, error = %failure, "Import row rejected");
        self.failed += 1;
        self.errors.push(RowError {
            row,
            message: failure.to_string(),
        });
    }

    /// Human-readable summary, e.g. `Successfully imported 3 students. Failed to import 1 students.`
    pub fn message(&self) -> String {
        let mut message = format!("Successfully imported {} {}.", self.imported, self.noun);
        if self.failed > 0 {
            message.push_str(&format!(" Failed to import {} {}.", self.failed, self.noun));
        }
        message
    }
}

fn ensure_columns(table: &Table, required: &[&str]) -> Result<(), ImportError> {
    let missing = table.missing_columns(required);
    if missing.is_empty() {
        Ok(())
    } else {
        Err(ImportError::MissingColumns(missing))
    }
}

/// Trimmed, non-empty cell value of a required column.
fn required_cell<'a>(row: &'a Row, column: &str) -> Result<&'a str, RowFailure> {
    match row.get(column).map(str::trim) {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(RowFailure::Invalid(format!("Missing value for '{column}'"))),
    }
}
