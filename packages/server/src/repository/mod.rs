//! Record store access behind explicit traits, so the import engine gets its
//! storage injected instead of reaching for the database itself.

mod result;
mod student;


use async_trait::async_trait;
use rust_decimal::Decimal;
use sea_orm::DbErr;

use crate::entity::{result as result_entity, student as student_entity};

pub use result::DbResultRepository;
pub use student::DbStudentRepository;

/// Whether an upsert inserted a new row or overwrote an existing one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Upsert<T> {
    Created(T),
    Updated(T),
}

impl<T> Upsert<T> {
    pub fn is_created(&self) -> bool {
        matches!(self, Upsert::Created(_))
    }
}

/// Validated student fields. `roll_number` is the identity key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudentFields {
    pub roll_number: String,
    pub name: String,
    pub class_name: String,
}

/// Identity of a result row.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResultKey {
    pub student_id: i32,
    pub subject: String,
    pub semester: String,
}

/// Validated result fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultFields {
    pub student_id: i32,
    pub subject: String,
    pub semester: String,
    pub marks_obtained: Decimal,
    pub total_marks: Decimal,
}

impl ResultFields {
    pub fn key(&self) -> ResultKey {
        ResultKey {
            student_id: self.student_id,
            subject: self.subject.clone(),
            semester: self.semester.clone(),
        }
    }
}

#[async_trait]
pub trait StudentRepository: Send + Sync {
    /// Look a student up by roll number.
    async fn find_by_key(&self, roll_number: &str)
    -> Result<Option<student_entity::Model>, DbErr>;

    /// Insert a new student. Fails on a duplicate roll number.
    async fn create(&self, fields: StudentFields) -> Result<student_entity::Model, DbErr>;

    /// Create the student, or overwrite `name` and `class_name` of the one
    /// holding the same roll number.
    async fn upsert(&self, fields: StudentFields) -> Result<Upsert<student_entity::Model>, DbErr>;
}

#[async_trait]
pub trait ResultRepository: Send + Sync {
    async fn find_by_key(&self, key: &ResultKey) -> Result<Option<result_entity::Model>, DbErr>;

    /// Insert a new result. Fails when the key is already taken.
    async fn create(&self, fields: ResultFields) -> Result<result_entity::Model, DbErr>;

    /// Create the result, or overwrite both marks of the one with the same key.
    async fn upsert(&self, fields: ResultFields) -> Result<Upsert<result_entity::Model>, DbErr>;
}
