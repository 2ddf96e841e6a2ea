use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Marks for one subject in one semester. Unique per
/// `(student_id, subject, semester)`, see `database::ensure_indexes`.
#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "result")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    #[sea_orm(indexed)]
    pub student_id: i32,
    #[sea_orm(belongs_to, from = "student_id", to = "id", on_delete = "Cascade")]
    pub student: HasOne<super::student::Entity>,

    pub subject: String,

    #[sea_orm(column_type = "Decimal(Some((5, 2)))")]
    pub marks_obtained: Decimal,
    #[sea_orm(column_type = "Decimal(Some((5, 2)))")]
    pub total_marks: Decimal,

    pub semester: String,

    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
