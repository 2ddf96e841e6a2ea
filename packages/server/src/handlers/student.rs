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
use crate::models::student::*;
use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/api/v1/students",
    tag = "Students",
    operation_id = "listStudents",
    summary = "List all students",
    responses(
        (status = 200, description = "All students ordered by ID", body = Vec<StudentResponse>),
    ),
)]
#[instrument(skip(state))]
pub async fn list_students(
    State(state): State<AppState>,
) -> Result<Json<Vec<StudentResponse>>, AppError> {
    let students = student::Entity::find()
        .order_by_asc(student::Column::Id)
        .all(&state.db)
        .await?;

    Ok(Json(students.into_iter().map(Into::into).collect()))
}

#[utoipa::path(
    post,
    path = "/api/v1/students",
    tag = "Students",
    operation_id = "createStudent",
    summary = "Create a student",
    request_body = StudentRequest,
    responses(
        (status = 201, description = "Student created", body = StudentResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 409, description = "Roll number already taken (CONFLICT)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload))]
pub async fn create_student(
    State(state): State<AppState>,
    AppJson(payload): AppJson<StudentRequest>,
) -> Result<impl IntoResponse, AppError> {
    let fields = payload.into_fields()?;
    let roll_number = fields.roll_number.clone();

    let model = state
        .students
        .create(fields)
        .await
        .map_err(|e| conflict_on_duplicate(e, || duplicate_roll_number(&roll_number)))?;

    Ok((StatusCode::CREATED, Json(StudentResponse::from(model))))
}

#[utoipa::path(
    get,
    path = "/api/v1/students/{id}",
    tag = "Students",
    operation_id = "getStudent",
    summary = "Get a student with their results",
    params(("id" = i32, Path, description = "Student ID")),
    responses(
        (status = 200, description = "Student with nested results", body = StudentDetailResponse),
        (status = 404, description = "Student not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(id))]
pub async fn get_student(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<StudentDetailResponse>, AppError> {
    let model = find_student(&state.db, id).await?;
    let results = result::Entity::find()
        .filter(result::Column::StudentId.eq(id))
        .order_by_asc(result::Column::Id)
        .all(&state.db)
        .await?;

    Ok(Json(StudentDetailResponse::new(model, results)))
}

#[utoipa::path(
    put,
    path = "/api/v1/students/{id}",
    tag = "Students",
    operation_id = "updateStudent",
    summary = "Replace a student",
    description = "Replaces `roll_number`, `name` and `class_name`. All three are required.",
    params(("id" = i32, Path, description = "Student ID")),
    request_body = StudentRequest,
    responses(
        (status = 200, description = "Student updated", body = StudentResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 404, description = "Student not found (NOT_FOUND)", body = ErrorBody),
        (status = 409, description = "Roll number already taken (CONFLICT)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(id))]
pub async fn update_student(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    AppJson(payload): AppJson<StudentRequest>,
) -> Result<Json<StudentResponse>, AppError> {
    let fields = payload.into_fields()?;
    let existing = find_student(&state.db, id).await?;

    let roll_number = fields.roll_number.clone();
    let mut active: student::ActiveModel = existing.into();
    active.roll_number = Set(fields.roll_number);
    active.name = Set(fields.name);
    active.class_name = Set(fields.class_name);
    active.updated_at = Set(chrono::Utc::now());

    let model = active
        .update(&state.db)
        .await
        .map_err(|e| conflict_on_duplicate(e, || duplicate_roll_number(&roll_number)))?;

    Ok(Json(model.into()))
}

async fn find_student<C: ConnectionTrait>(db: &C, id: i32) -> Result<student::Model, AppError> {
    student::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Student not found".into()))
}

fn duplicate_roll_number(roll_number: &str) -> String {
    format!("Student with roll number {roll_number} already exists")
}
