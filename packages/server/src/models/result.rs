use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::shared::{
    SEMESTER_MAX_LEN, SUBJECT_MAX_LEN, clean_marks, clean_text, percentage, required,
};
use crate::entity::result;
use crate::error::AppError;
use crate::repository::ResultFields;

#[derive(Deserialize, Default, ToSchema)]
pub struct CreateResultRequest {
    #[schema(example = 1)]
    pub student_id: Option<i32>,
    #[schema(example = "Math")]
    pub subject: Option<String>,
    #[schema(value_type = Option<String>, example = "45.00")]
    pub marks_obtained: Option<Decimal>,
    #[schema(value_type = Option<String>, example = "50.00")]
    pub total_marks: Option<Decimal>,
    #[schema(example = "S1")]
    pub semester: Option<String>,
}

/// Full replacement of a result. The owning student cannot be changed.
#[derive(Deserialize, Default, ToSchema)]
pub struct UpdateResultRequest {
    pub subject: Option<String>,
    #[schema(value_type = Option<String>)]
    pub marks_obtained: Option<Decimal>,
    #[schema(value_type = Option<String>)]
    pub total_marks: Option<Decimal>,
    pub semester: Option<String>,
}

impl CreateResultRequest {
    pub fn into_fields(self) -> Result<ResultFields, AppError> {
        validate_result(
            required("student_id", self.student_id)?,
            &required("subject", self.subject)?,
            &required("semester", self.semester)?,
            required("marks_obtained", self.marks_obtained)?,
            required("total_marks", self.total_marks)?,
        )
        .map_err(AppError::Validation)
    }
}

impl UpdateResultRequest {
    pub fn into_fields(self, student_id: i32) -> Result<ResultFields, AppError> {
        validate_result(
            student_id,
            &required("subject", self.subject)?,
            &required("semester", self.semester)?,
            required("marks_obtained", self.marks_obtained)?,
            required("total_marks", self.total_marks)?,
        )
        .map_err(AppError::Validation)
    }
}

/// Check and normalize result fields. Marks are rounded to two places and
/// `total_marks` must be positive.
pub fn validate_result(
    student_id: i32,
    subject: &str,
    semester: &str,
    marks_obtained: Decimal,
    total_marks: Decimal,
) -> Result<ResultFields, String> {
    let subject = clean_text("subject", subject, SUBJECT_MAX_LEN)?;
    let semester = clean_text("semester", semester, SEMESTER_MAX_LEN)?;
    let marks_obtained = clean_marks("marks_obtained", marks_obtained)?;
    let total_marks = clean_marks("total_marks", total_marks)?;
    if total_marks.is_zero() {
        return Err("total_marks must be greater than zero".into());
    }
    Ok(ResultFields {
        student_id,
        subject,
        semester,
        marks_obtained,
        total_marks,
    })
}

#[derive(Serialize, ToSchema)]
pub struct ResultResponse {
    pub id: i32,
    pub student_id: i32,
    pub subject: String,
    #[schema(value_type = String, example = "45.00")]
    pub marks_obtained: Decimal,
    #[schema(value_type = String, example = "50.00")]
    pub total_marks: Decimal,
    pub semester: String,
    /// `marks_obtained / total_marks * 100` rounded to two places,
    /// `null` when `total_marks` is zero.
    #[schema(value_type = Option<String>, example = "90.00")]
    pub percentage: Option<Decimal>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<result::Model> for ResultResponse {
    fn from(m: result::Model) -> Self {
        Self {
            id: m.id,
            student_id: m.student_id,
            percentage: percentage(m.marks_obtained, m.total_marks),
            subject: m.subject,
            marks_obtained: m.marks_obtained,
            total_marks: m.total_marks,
            semester: m.semester,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}
