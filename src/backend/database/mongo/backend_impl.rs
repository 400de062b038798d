use async_trait::async_trait;
use mongodb::bson::doc;
use mongodb::options::ClientOptions;
use mongodb::{Client, Collection, Database};
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tracing::{debug, info};

use super::super::config::DatabaseBackendConfig;
use super::super::USERS_TABLE;
use super::UserDocument;
use crate::backend::database::{
    MongoUserDeleter, MongoUserInserter, MongoUserReader, MongoUserUpdater,
    UnifiedUserDeleteOps, UnifiedUserInsertOps, UnifiedUserReadOps, UnifiedUserUpdateOps,
};
use crate::backend::{Backend, DatabaseType, UserRepository};
use crate::error::{AppError, AppResult};
use crate::models::{CreateUserRequest, UpdateUserRequest, User};

/// MongoDB backend implementation using the official driver
pub struct MongoBackend {
    client: Client,
    database: Database,
    collection: Collection<UserDocument>,
    closed: AtomicBool,
    user_insert_ops: UnifiedUserInsertOps<MongoUserInserter>,
    user_update_ops: UnifiedUserUpdateOps<MongoUserUpdater>,
    user_delete_ops: UnifiedUserDeleteOps<MongoUserDeleter>,
    user_read_ops: UnifiedUserReadOps<MongoUserReader>,
}

impl MongoBackend {
    /// Create a new MongoDB backend over an existing client
    pub fn new(client: Client, database_name: &str) -> Self {
        let id_format = DatabaseType::MongoDB.id_format();
        let database = client.database(database_name);
        let collection = database.collection::<UserDocument>(USERS_TABLE);

        Self {
            user_insert_ops: UnifiedUserInsertOps::new(
                MongoUserInserter::new(collection.clone()),
                id_format,
            ),
            user_update_ops: UnifiedUserUpdateOps::new(
                MongoUserUpdater::new(collection.clone()),
                id_format,
            ),
            user_delete_ops: UnifiedUserDeleteOps::new(
                MongoUserDeleter::new(collection.clone()),
                id_format,
            ),
            user_read_ops: UnifiedUserReadOps::new(
                MongoUserReader::new(collection.clone()),
                id_format,
            ),
            client,
            database,
            collection,
            closed: AtomicBool::new(false),
        }
    }

    async fn ping(&self) -> AppResult<()> {
        self.database
            .run_command(doc! { "ping": 1 })
            .await
            .map_err(|e| AppError::BackendUnavailable(format!("MongoDB ping failed: {}", e)))?;
        Ok(())
    }
}

#[async_trait]
impl Backend for MongoBackend {
    async fn connect(config: &DatabaseBackendConfig) -> AppResult<Self> {
        config
            .validate()
            .map_err(|e| AppError::Configuration(format!("Invalid backend config: {}", e)))?;

        let mut options = ClientOptions::parse(&config.connection_url)
            .await
            .map_err(|e| AppError::Configuration(format!("Invalid MongoDB URI: {}", e)))?;

        let timeout = Duration::from_secs(config.connection_timeout);
        options.app_name = Some(env!("CARGO_PKG_NAME").to_string());
        options.max_pool_size = Some(config.max_connections);
        options.connect_timeout = Some(timeout);
        options.server_selection_timeout = Some(timeout);

        // A database named in the URI wins over the configured default
        let database_name = options
            .default_database
            .clone()
            .unwrap_or_else(|| config.database_name.clone());

        let client = Client::with_options(options)
            .map_err(|e| AppError::Configuration(format!("Invalid MongoDB options: {}", e)))?;

        let backend = Self::new(client, &database_name);
        backend.ping().await?;

        info!(database = %database_name, "Connected to MongoDB");

        Ok(backend)
    }

    fn database_type(&self) -> DatabaseType {
        DatabaseType::MongoDB
    }

    async fn health_check(&self) -> AppResult<()> {
        if self.closed.load(Ordering::SeqCst) {
            return Err(AppError::BackendUnavailable(
                "MongoDB client has been closed".to_string(),
            ));
        }
        self.ping().await
    }

    async fn init_schema(&self) -> AppResult<()> {
        super::schema::init_indexes(&self.collection).await?;
        debug!("MongoDB indexes ready");
        Ok(())
    }

    async fn close(&self) -> AppResult<()> {
        if !self.closed.swap(true, Ordering::SeqCst) {
            self.client.clone().shutdown().await;
            info!("MongoDB client closed");
        }
        Ok(())
    }
}

#[async_trait]
impl UserRepository for MongoBackend {
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
