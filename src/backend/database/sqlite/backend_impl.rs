use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;
use std::time::Duration;
use tracing::{debug, info};

use super::super::config::DatabaseBackendConfig;
use crate::backend::database::{
    SqliteUserDeleter, SqliteUserInserter, SqliteUserReader, SqliteUserUpdater,
    UnifiedUserDeleteOps, UnifiedUserInsertOps, UnifiedUserReadOps, UnifiedUserUpdateOps,
};
use crate::backend::{Backend, DatabaseType, UserRepository};
use crate::error::{AppError, AppResult};
use crate::models::{CreateUserRequest, UpdateUserRequest, User};

/// SQLite database backend implementation
///
/// Used for file-backed deployments and, with `:memory:`, as the
/// development fallback and the default test backend.
pub struct SqliteBackend {
    pool: SqlitePool,
    user_insert_ops: UnifiedUserInsertOps<SqliteUserInserter>,
    user_update_ops: UnifiedUserUpdateOps<SqliteUserUpdater>,
    user_delete_ops: UnifiedUserDeleteOps<SqliteUserDeleter>,
    user_read_ops: UnifiedUserReadOps<SqliteUserReader>,
}

impl SqliteBackend {
    /// Create a new SQLite backend instance
    pub fn new(pool: SqlitePool) -> Self {
        let id_format = DatabaseType::SQLite.id_format();

        let user_inserter = SqliteUserInserter::new(pool.clone());
        let user_updater = SqliteUserUpdater::new(pool.clone());
        let user_deleter = SqliteUserDeleter::new(pool.clone());
        let user_reader = SqliteUserReader::new(pool.clone());

        Self {
            pool,
            user_insert_ops: UnifiedUserInsertOps::new(user_inserter, id_format),
            user_update_ops: UnifiedUserUpdateOps::new(user_updater, id_format),
            user_delete_ops: UnifiedUserDeleteOps::new(user_deleter, id_format),
            user_read_ops: UnifiedUserReadOps::new(user_reader, id_format),
        }
    }

    fn connect_options(config: &DatabaseBackendConfig) -> AppResult<SqliteConnectOptions> {
        let options = if config.is_memory_database() {
            SqliteConnectOptions::from_str("sqlite::memory:")
        } else if config.connection_url.starts_with("sqlite:") {
            SqliteConnectOptions::from_str(&config.connection_url)
        } else {
            Ok(SqliteConnectOptions::new().filename(&config.connection_url))
        }
        .map_err(|e| AppError::Configuration(format!("Invalid SQLite URL: {}", e)))?;

        Ok(options.create_if_missing(true))
    }
}

#[async_trait]
impl Backend for SqliteBackend {
    async fn connect(config: &DatabaseBackendConfig) -> AppResult<Self> {
        config
            .validate()
            .map_err(|e| AppError::Configuration(format!("Invalid backend config: {}", e)))?;

        let options = Self::connect_options(config)?;

        let mut pool_options = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.connection_timeout));

        // Each in-memory connection is a separate database, so keep exactly
        // one alive for the lifetime of the pool.
        if config.is_memory_database() {
            pool_options = pool_options
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None);
        }

        let pool = pool_options.connect_with(options).await.map_err(|e| {
            AppError::BackendUnavailable(format!("Failed to connect to SQLite: {}", e))
        })?;

        info!(
            in_memory = config.is_memory_database(),
            "Connected to SQLite"
        );

        Ok(Self::new(pool))
    }

    fn database_type(&self) -> DatabaseType {
        DatabaseType::SQLite
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
        debug!("SQLite schema ready");
        Ok(())
    }

    async fn close(&self) -> AppResult<()> {
        if !self.pool.is_closed() {
            self.pool.close().await;
            info!("SQLite pool closed");
        }
        Ok(())
    }
}

#[async_trait]
impl UserRepository for SqliteBackend {
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
