use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use crate::core::Config;
use crate::db::DbService;
use crate::utils::AppError;

/// Server state — shared handles for every request
///
/// Cloning is cheap: the embedded database handle is internally
/// reference counted.
#[derive(Clone, Debug)]
pub struct ServerState {
    /// Server configuration
    pub config: Config,
    /// Embedded database (SurrealDB)
    pub db: Surreal<Db>,
}

impl ServerState {
    pub fn new(config: Config, db: Surreal<Db>) -> Self {
        Self { config, db }
    }

    /// Initialize the server state: work directory, then database
    pub async fn initialize(config: &Config) -> Result<Self, AppError> {
        config
            .ensure_work_dir_structure()
            .map_err(|e| AppError::Internal(format!("Failed to create work directory: {e}")))?;

        let db_service = DbService::open(&config.database_dir()).await?;

        Ok(Self::new(config.clone(), db_service.db))
    }

    /// In-memory state for tests
    #[cfg(test)]
    pub async fn in_memory() -> Self {
        let db_service = DbService::open_in_memory()
            .await
            .expect("Failed to open in-memory database");
        Self::new(Config::with_overrides("/tmp/hotel-test", 0), db_service.db)
    }

    pub fn get_db(&self) -> Surreal<Db> {
        self.db.clone()
    }
}
