use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use sea_orm::*;
use tracing::instrument;

use super::conflict_on_duplicate;
use crate::entity::{result, student};
use crate::error::{AppError, ErrorBody};
use crate::extractors::json::AppJson;
use crate::models::result::*;
use crate::state::AppState;

const DUPLICATE_RESULT: &str = "A result for this student, subject and semester already exists";

#[utoipa::path(
    get,
    path = "/api/v1/results",
    tag = "Results",
    operation_id = "listResults",
    summary = "List all results",
    responses(
        (status = 200, description = "All results ordered by ID", body = Vec<ResultResponse>),
    ),
)]
#[instrument(skip(state))]
pub async fn list_results(
    State(state): State<AppState>,
) -> Result<Json<Vec<ResultResponse>>, AppError> {
    let results = result::Entity::find()
        .order_by_asc(result::Column::Id)
        .all(&state.db)
        .await?;

    Ok(Json(results.into_iter().map(Into::into).collect()))
}

#[utoipa::path(
    post,
    path = "/api/v1/results",
    tag = "Results",
    operation_id = "createResult",
    summary = "Create a result",
    description = "Creates a result for an existing student. `total_marks` must be greater than zero.",
    request_body = CreateResultRequest,
    responses(
        (status = 201, description = "Result created", body = ResultResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 404, description = "Student not found (NOT_FOUND)", body = ErrorBody),
        (status = 409, description = "Duplicate student/subject/semester (CONFLICT)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload))]
pub async fn create_result(
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateResultRequest>,
) -> Result<impl IntoResponse, AppError> {
    let fields = payload.into_fields()?;

    if student::Entity::find_by_id(fields.student_id)
        .one(&state.db)
        .await?
        .is_none()
    {
        return Err(AppError::NotFound("Student not found".into()));
    }

    let model = state
        .results
        .create(fields)
        .await
        .map_err(|e| conflict_on_duplicate(e, || DUPLICATE_RESULT.into()))?;

    Ok((StatusCode::CREATED, Json(ResultResponse::from(model))))
}

#[utoipa::path(
    get,
    path = "/api/v1/results/{id}",
    tag = "Results",
    operation_id = "getResult",
    summary = "Get a result by ID",
    params(("id" = i32, Path, description = "Result ID")),
    responses(
        (status = 200, description = "Result details", body = ResultResponse),
        (status = 404, description = "Result not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(id))]
pub async fn get_result(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<ResultResponse>, AppError> {
    let model = find_result(&state.db, id).await?;
    Ok(Json(model.into()))
}

#[utoipa::path(
    put,
    path = "/api/v1/results/{id}",
    tag = "Results",
    operation_id = "updateResult",
    summary = "Replace a result",
    description = "Replaces subject, marks, total and semester. The owning student is kept.",
    params(("id" = i32, Path, description = "Result ID")),
    request_body = UpdateResultRequest,
    responses(
        (status = 200, description = "Result updated", body = ResultResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 404, description = "Result not found (NOT_FOUND)", body = ErrorBody),
        (status = 409, description = "Duplicate student/subject/semester (CONFLICT)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(id))]
pub async fn update_result(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    AppJson(payload): AppJson<UpdateResultRequest>,
) -> Result<Json<ResultResponse>, AppError> {
    let existing = find_result(&state.db, id).await?;
    let fields = payload.into_fields(existing.student_id)?;

    let mut active: result::ActiveModel = existing.into();
    active.subject = Set(fields.subject);
    active.semester = Set(fields.semester);
    active.marks_obtained = Set(fields.marks_obtained);
    active.total_marks = Set(fields.total_marks);
    active.updated_at = Set(chrono::Utc::now());

    let model = active
        .update(&state.db)
        .await
        .map_err(|e| conflict_on_duplicate(e, || DUPLICATE_RESULT.into()))?;

    Ok(Json(model.into()))
}

#[utoipa::path(
    delete,
    path = "/api/v1/results/{id}",
    tag = "Results",
    operation_id = "deleteResult",
    summary = "Delete a result",
    params(("id" = i32, Path, description = "Result ID")),
    responses(
        (status = 204, description = "Result deleted"),
        (status = 404, description = "Result not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(id))]
pub async fn delete_result(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, AppError> {
    let res = result::Entity::delete_by_id(id).exec(&state.db).await?;
    if res.rows_affected == 0 {
        return Err(AppError::NotFound("Result not found".into()));
    }
    Ok(StatusCode::NO_CONTENT)
}

async fn find_result<C: ConnectionTrait>(db: &C, id: i32) -> Result<result::Model, AppError> {
    result::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Result not found".into()))
}
