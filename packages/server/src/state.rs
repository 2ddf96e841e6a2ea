use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::config::AppConfig;
use crate::repository::{
    DbResultRepository, DbStudentRepository, ResultRepository, StudentRepository,
};

#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub config: Arc<AppConfig>,
    pub students: Arc<dyn StudentRepository>,
    pub results: Arc<dyn ResultRepository>,
}

impl AppState {
    /// State whose repositories share `db`.
    pub fn new(db: DatabaseConnection, config: AppConfig) -> Self {
        Self {
            students: Arc::new(DbStudentRepository::new(db.clone())),
            results: Arc::new(DbResultRepository::new(db.clone())),
            config: Arc::new(config),
            db,
        }
    }
}
