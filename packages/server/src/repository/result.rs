use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, Set,
};

use super::{ResultFields, ResultKey, ResultRepository, Upsert};
use crate::entity::result;

/// [`ResultRepository`] backed by the application database.
#[derive(Clone)]
pub struct DbResultRepository {
    db: DatabaseConnection,
}

impl DbResultRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ResultRepository for DbResultRepository {
    async fn find_by_key(&self, key: &ResultKey) -> Result<Option<result::Model>, DbErr> {
        result::Entity::find()
            .filter(result::Column::StudentId.eq(key.student_id))
            .filter(result::Column::Subject.eq(key.subject.as_str()))
            .filter(result::Column::Semester.eq(key.semester.as_str()))
            .one(&self.db)
            .await
    }

    async fn create(&self, fields: ResultFields) -> Result<result::Model, DbErr> {
        let now = Utc::now();
        result::ActiveModel {
            student_id: Set(fields.student_id),
            subject: Set(fields.subject),
            semester: Set(fields.semester),
            marks_obtained: Set(fields.marks_obtained),
            total_marks: Set(fields.total_marks),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&self.db)
        .await
    }

    async fn upsert(&self, fields: ResultFields) -> Result<Upsert<result::Model>, DbErr> {
        let Some(existing) = self.find_by_key(&fields.key()).await? else {
            return self.create(fields).await.map(Upsert::Created);
        };

        let mut active: result::ActiveModel = existing.into();
        active.marks_obtained = Set(fields.marks_obtained);
        active.total_marks = Set(fields.total_marks);
        active.updated_at = Set(Utc::now());

        active.update(&self.db).await.map(Upsert::Updated)
    }
}
