use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use std::time::Duration;
use tracing::{debug, info};

use super::super::config::DatabaseBackendConfig;
use crate::backend::database::{
    PostgresUserDeleter, PostgresUserInserter, PostgresUserReader, PostgresUserUpdater,
    UnifiedUserDeleteOps, UnifiedUserInsertOps, UnifiedUserReadOps, UnifiedUserUpdateOps,
};
use crate::backend::{Backend, DatabaseType, UserRepository};
use crate::error::{AppError, AppResult};
use crate::models::{CreateUserRequest, UpdateUserRequest, User};

/// PostgreSQL database backend implementation
pub struct PostgresBackend {
    pool: PgPool,
    user_insert_ops: UnifiedUserInsertOps<PostgresUserInserter>,
    user_update_ops: UnifiedUserUpdateOps<PostgresUserUpdater>,
    user_delete_ops: UnifiedUserDeleteOps<PostgresUserDeleter>,
    user_read_ops: UnifiedUserReadOps<PostgresUserReader>,
}

impl PostgresBackend {
    /// Create a new PostgreSQL backend instance
    pub fn new(pool: PgPool) -> Self {
        let id_format = DatabaseType::PostgreSQL.id_format();

        // Create database-specific adapters
        let user_inserter = PostgresUserInserter::new(pool.clone());
        let user_updater = PostgresUserUpdater::new(pool.clone());
        let user_deleter = PostgresUserDeleter::new(pool.clone());
        let user_reader = PostgresUserReader::new(pool.clone());

        Self {
            pool,
            user_insert_ops: UnifiedUserInsertOps::new(user_inserter, id_format),
            user_update_ops: UnifiedUserUpdateOps::new(user_updater, id_format),
            user_delete_ops: UnifiedUserDeleteOps::new(user_deleter, id_format),
            user_read_ops: UnifiedUserReadOps::new(user_reader, id_format),
        }
    }
}

#[async_trait]
impl Backend for PostgresBackend {
    async fn connect(config: &DatabaseBackendConfig) -> AppResult<Self> {
        config
            .validate()
            .map_err(|e| AppError::Configuration(format!("Invalid backend config: {}", e)))?;

        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.connection_timeout))
            .connect(&config.connection_url)
            .await
            .map_err(|e| {
                AppError::BackendUnavailable(format!("Failed to connect to PostgreSQL: {}", e))
            })?;

        info!(
            max_connections = config.max_connections,
            "Connected to PostgreSQL"
        );

        Ok(Self::new(pool))
    }

    fn database_type(&self) -> DatabaseType {
        DatabaseType::PostgreSQL
    }

    async fn health_check(&self) -> AppResult<()> {
        sqlx::query("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::BackendUnavailable(format!("Health check failed: {}", e)))?;

        Ok(())
    }

    async fn init_schema(&self) -> AppResult<()> {
        super::schema::init_schema(&self.pool).await?;
        debug!("PostgreSQL schema ready");
        Ok(())
    }

    async fn close(&self) -> AppResult<()> {
        if !self.pool.is_closed() {
            self.pool.close().await;
            info!("PostgreSQL pool closed");
        }
        Ok(())
    }
}

#[async_trait]
impl UserRepository for PostgresBackend {
    async fn create_user(&self, input: &CreateUserRequest) -> AppResult<User> {
        self.user_insert_ops.create_user(input).await
    }

    async fn find_all_users(&self, limit: i64, skip: i64) -> AppResult<Vec<User>> {
        self.user_read_ops.find_all_users(limit, skip).await
    }

    async fn count_users(&self) -> AppResult<i64> {
        self.user_read_ops.count_users().await
    }

    async fn find_user_by_id(&self, id: &str) -> AppResult<Option<User>> {
        self.user_read_ops.find_user_by_id(id).await
    }

    async fn find_user_by_email(&self, email: &str) -> AppResult<Option<User>> {
        self.user_read_ops.find_user_by_email(email).await
    }

    async fn update_user(&self, id: &str, patch: &UpdateUserRequest) -> AppResult<Option<User>> {
        self.user_update_ops.update_user(id, patch).await
    }

    async fn delete_user(&self, id: &str) -> AppResult<bool> {
        self.user_delete_ops.delete_user(id).await
    }
}
