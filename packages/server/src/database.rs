use std::time::Duration;

use sea_orm::sea_query::{Index, PostgresQueryBuilder};
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbErr};
use tracing::info;

use crate::config::DatabaseConfig;
use crate::entity::result;

/// Name of the unique index backing the `(student, subject, semester)` upsert key.
pub const RESULT_KEY_INDEX: &str = "idx_result_student_subject_semester";

pub async fn init_db(config: &DatabaseConfig) -> Result<DatabaseConnection, DbErr> {
    let mut opt = ConnectOptions::new(config.url.clone());

    opt.max_connections(config.max_connections)
        .min_connections(1)
        .connect_timeout(Duration::from_secs(8))
        .acquire_timeout(Duration::from_secs(8))
        .sqlx_logging(false);

    let db = Database::connect(opt).await?;
    db.get_schema_registry("marksheet::entity::*")
        .sync(&db)
        .await?;
    ensure_indexes(&db).await?;

    Ok(db)
}

/// Ensure the unique index backing the result upsert key exists under
/// [`RESULT_KEY_INDEX`].
pub async fn ensure_indexes(db: &DatabaseConnection) -> Result<(), DbErr> {
    let stmt = Index::create()
        .if_not_exists()
        .unique()
        .name(RESULT_KEY_INDEX)
        .table(result::Entity)
        .col(result::Column::StudentId)
        .col(result::Column::Subject)
        .col(result::Column::Semester)
        .to_string(PostgresQueryBuilder);

    db.execute_unprepared(&stmt).await?;
    info!("Ensured index {} exists", RESULT_KEY_INDEX);

    Ok(())
}
