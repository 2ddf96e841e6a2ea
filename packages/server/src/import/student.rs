use tracing::instrument;

use super::{ImportError, ImportSummary, RowFailure, ensure_columns, required_cell};
use crate::models::student::validate_student;
use crate::repository::StudentRepository;
use crate::tabular::{Row, Table};

pub const STUDENT_COLUMNS: [&str; 3] = ["roll_number", "name", "class_name"];

/// Create or update one student per row, keyed by roll number.
#[instrument(skip_all, fields(rows = table.rows.len()))]
pub async fn import_students(
    table: &Table,
    students: &dyn StudentRepository,
) -> Result<ImportSummary, ImportError> {
    ensure_columns(table, &STUDENT_COLUMNS)?;

    let mut summary = ImportSummary::new("students");
    for row in &table.rows {
        match import_row(row, students).await {
            Ok(()) => summary.record_success(),
            Err(failure) => summary.record_failure(row.line(), failure),
        }
    }

    tracing::info!(
        imported = summary.imported,
        failed = summary.failed,
        "Student import finished"
    );
    Ok(summary)
}

async fn import_row(row: &Row, students: &dyn StudentRepository) -> Result<(), RowFailure> {
    let fields = validate_student(
        required_cell(row, "roll_number")?,
        required_cell(row, "name")?,
        required_cell(row, "class_name")?,
    )
    .map_err(RowFailure::Invalid)?;

    let outcome = students.upsert(fields).await?;
    tracing::trace!(created = outcome.is_created(), "Student row stored");
    Ok(())
}
