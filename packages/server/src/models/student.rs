use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::result::ResultResponse;
use super::shared::{CLASS_NAME_MAX_LEN, NAME_MAX_LEN, ROLL_NUMBER_MAX_LEN, clean_text, required};
use crate::entity::{result, student};
use crate::error::AppError;
use crate::repository::StudentFields;

/// Body of `POST /students` and `PUT /students/{id}`. Updates replace all
/// three fields, so both requests share this shape.
#[derive(Deserialize, Default, ToSchema)]
pub struct StudentRequest {
    #[schema(example = "R001")]
    pub roll_number: Option<String>,
    #[schema(example = "Alice")]
    pub name: Option<String>,
    #[schema(example = "10A")]
    pub class_name: Option<String>,
}

impl StudentRequest {
    pub fn into_fields(self) -> Result<StudentFields, AppError> {
        validate_student(
            &required("roll_number", self.roll_number)?,
            &required("name", self.name)?,
            &required("class_name", self.class_name)?,
        )
        .map_err(AppError::Validation)
    }
}

/// Check and trim the three student fields. Shared by the JSON endpoints
/// and the spreadsheet import.
pub fn validate_student(
    roll_number: &str,
    name: &str,
    class_name: &str,
) -> Result<StudentFields, String> {
    Ok(StudentFields {
        roll_number: clean_text("roll_number", roll_number, ROLL_NUMBER_MAX_LEN)?,
        name: clean_text("name", name, NAME_MAX_LEN)?,
        class_name: clean_text("class_name", class_name, CLASS_NAME_MAX_LEN)?,
    })
}

#[derive(Serialize, ToSchema)]
pub struct StudentResponse {
    pub id: i32,
    pub roll_number: String,
    pub name: String,
    pub class_name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A student together with all of their results.
#[derive(Serialize, ToSchema)]
pub struct StudentDetailResponse {
    #[serde(flatten)]
    pub student: StudentResponse,
    pub results: Vec<ResultResponse>,
}

impl From<student::Model> for StudentResponse {
    fn from(m: student::Model) -> Self {
        Self {
            id: m.id,
            roll_number: m.roll_number,
            name: m.name,
            class_name: m.class_name,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

impl StudentDetailResponse {
    pub fn new(student: student::Model, results: Vec<result::Model>) -> Self {
        Self {
            student: student.into(),
            results: results.into_iter().map(Into::into).collect(),
        }
    }
}
