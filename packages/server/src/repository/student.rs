use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, Set,
};

use super::{StudentFields, StudentRepository, Upsert};
use crate::entity::student;

/// [`StudentRepository`] backed by the application database.
#[derive(Clone)]
pub struct DbStudentRepository {
    db: DatabaseConnection,
}

impl DbStudentRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl StudentRepository for DbStudentRepository {
    async fn find_by_key(&self, roll_number: &str) -> Result<Option<student::Model>, DbErr> {
        student::Entity::find()
            .filter(student::Column::RollNumber.eq(roll_number))
            .one(&self.db)
            .await
    }

    async fn create(&self, fields: StudentFields) -> Result<student::Model, DbErr> {
        let now = Utc::now();
        student::ActiveModel {
            roll_number: Set(fields.roll_number),
            name: Set(fields.name),
            class_name: Set(fields.class_name),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&self.db)
        .await
    }

    async fn upsert(&self, fields: StudentFields) -> Result<Upsert<student::Model>, DbErr> {
        let Some(existing) = self.find_by_key(&fields.roll_number).await? else {
            return self.create(fields).await.map(Upsert::Created);
        };

        let mut active: student::ActiveModel = existing.into();
        active.name = Set(fields.name);
        active.class_name = Set(fields.class_name);
        active.updated_at = Set(Utc::now());

        active.update(&self.db).await.map(Upsert::Updated)
    }
}
