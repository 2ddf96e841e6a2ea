use axum::Json;
use axum::extract::multipart::MultipartRejection;
use axum::extract::{Multipart, State};
use tracing::instrument;

use crate::error::{AppError, ErrorBody};
use crate::import;
use crate::models::import::ImportResponse;
use crate::state::AppState;
use crate::tabular::{Table, parse_table};

#[utoipa::path(
    post,
    path = "/api/v1/students/import",
    tag = "Imports",
    operation_id = "importStudents",
    summary = "Import students from a spreadsheet",
    description = "Upserts students by `roll_number`. Required columns: `roll_number`, `name`, `class_name`. Accepts `.csv`, `.xlsx` and `.xls`. Failing rows are reported in `errors` and do not stop the import.",
    request_body(content_type = "multipart/form-data", description = "Spreadsheet in the `file` field"),
    responses(
        (status = 200, description = "Import finished", body = ImportResponse),
        (status = 400, description = "No file, unsupported format, missing columns or unreadable file (NO_FILE, UNSUPPORTED_FORMAT, MISSING_COLUMNS, PROCESSING_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, multipart))]
pub async fn import_students(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<ImportResponse>, AppError> {
    let table = read_upload(multipart).await?;
    let summary = import::import_students(&table, state.students.as_ref()).await?;
    Ok(Json(summary.into()))
}

#[utoipa::path(
    post,
    path = "/api/v1/results/import",
    tag = "Imports",
    operation_id = "importResults",
    summary = "Import results from a spreadsheet",
    description = "Upserts results by student, subject and semester. Required columns: `student_roll_number`, `subject`, `marks_obtained`, `total_marks`, `semester`. Students must already exist.",
    request_body(content_type = "multipart/form-data", description = "Spreadsheet in the `file` field"),
    responses(
        (status = 200, description = "Import finished", body = ImportResponse),
        (status = 400, description = "No file, unsupported format, missing columns or unreadable file (NO_FILE, UNSUPPORTED_FORMAT, MISSING_COLUMNS, PROCESSING_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, multipart))]
pub async fn import_results(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<ImportResponse>, AppError> {
    let table = read_upload(multipart).await?;
    let summary =
        import::import_results(&table, state.students.as_ref(), state.results.as_ref()).await?;
    Ok(Json(summary.into()))
}

/// Pull the `file` part out of the form and parse it.
async fn read_upload(multipart: Result<Multipart, MultipartRejection>) -> Result<Table, AppError> {
    let mut multipart = multipart.map_err(|_| AppError::NoFile)?;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Multipart error: {e}")))?
    {
        if field.name() != Some("file") {
            continue;
        }
        let file_name = field.file_name().unwrap_or_default().to_string();
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("Failed to read file: {e}")))?;

        tracing::debug!(file_name = %file_name, size = data.len(), "Received import upload");
        return Ok(parse_table(&file_name, &data)?);
    }

    Err(AppError::NoFile)
}
