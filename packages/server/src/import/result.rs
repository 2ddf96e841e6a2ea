use tracing::instrument;

use super::{ImportError, ImportSummary, RowFailure, ensure_columns, required_cell};
use crate::models::result::validate_result;
use crate::models::shared::parse_marks;
use crate::repository::{ResultRepository, StudentRepository};
use crate::tabular::{Row, Table};

pub const RESULT_COLUMNS: [&str; 5] = [
    "student_roll_number",
    "subject",
    "marks_obtained",
    "total_marks",
    "semester",
];

/// Create or update one result per row, keyed by student, subject and
/// semester. The student must already exist.
#[instrument(skip_all, fields(rows = table.rows.len()))]
pub async fn import_results(
    table: &Table,
    students: &dyn StudentRepository,
    results: &dyn ResultRepository,
) -> Result<ImportSummary, ImportError> {
    ensure_columns(table, &RESULT_COLUMNS)?;

    let mut summary = ImportSummary::new("results");
    for row in &table.rows {
        match import_row(row, students, results).await {
            Ok(()) => summary.record_success(),
            Err(failure) => summary.record_failure(row.line(), failure),
        }
    }

    tracing::info!(
        imported = summary.imported,
        failed = summary.failed,
        "Result import finished"
    );
    Ok(summary)
}

async fn import_row(
    row: &Row,
    students: &dyn StudentRepository,
    results: &dyn ResultRepository,
) -> Result<(), RowFailure> {
    let roll_number = required_cell(row, "student_roll_number")?;
    let student = students
        .find_by_key(roll_number)
        .await?
        .ok_or_else(|| RowFailure::StudentNotFound(roll_number.to_string()))?;

    let marks_obtained = parse_marks("marks_obtained", required_cell(row, "marks_obtained")?)
        .map_err(RowFailure::Invalid)?;
    let total_marks = parse_marks("total_marks", required_cell(row, "total_marks")?)
        .map_err(RowFailure::Invalid)?;

    let fields = validate_result(
        student.id,
        required_cell(row, "subject")?,
        required_cell(row, "semester")?,
        marks_obtained,
        total_marks,
    )
    .map_err(RowFailure::Invalid)?;

    let outcome = results.upsert(fields).await?;
    tracing::trace!(created = outcome.is_created(), "Result row stored");
    Ok(())
}
