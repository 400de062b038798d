use crate::error::{AppError, AppResult};
use crate::models::{CreateUserRequest, UpdateUserRequest, User};
use async_trait::async_trait;
use lazy_static::lazy_static;
use regex::Regex;
use std::sync::Arc;

pub mod database;

use database::DatabaseBackendConfig;

lazy_static! {
    static ref UUID_PATTERN: Regex = Regex::new(
        r"^[0-9a-fA-F]{8}-[0-9a-fA-F]{4}-[1-5][0-9a-fA-F]{3}-[89abAB][0-9a-fA-F]{3}-[0-9a-fA-F]{12}$"
    )
    .unwrap();
    static ref OBJECT_ID_PATTERN: Regex = Regex::new(r"^[0-9a-fA-F]{24}$").unwrap();
}

/// Supported database backend types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatabaseType {
    PostgreSQL,
    SQLite,
    MongoDB,
}

impl DatabaseType {
    /// Parse an explicit backend name from configuration
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "postgresql" | "postgres" => Some(DatabaseType::PostgreSQL),
            "sqlite" => Some(DatabaseType::SQLite),
            "mongodb" | "mongo" => Some(DatabaseType::MongoDB),
            _ => None,
        }
    }

    /// Infer the backend from a connection string
    pub fn from_url(url: &str) -> Option<Self> {
        if url.starts_with("postgres://") || url.starts_with("postgresql://") {
            Some(DatabaseType::PostgreSQL)
        } else if url.starts_with("mongodb://") || url.starts_with("mongodb+srv://") {
            Some(DatabaseType::MongoDB)
        } else if url.starts_with("sqlite:")
            || url == ":memory:"
            || url.ends_with(".db")
            || url.ends_with(".sqlite")
        {
            Some(DatabaseType::SQLite)
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DatabaseType::PostgreSQL => "postgresql",
            DatabaseType::SQLite => "sqlite",
            DatabaseType::MongoDB => "mongodb",
        }
    }

    /// Identifier shape native to this backend
    pub fn id_format(&self) -> IdFormat {
        match self {
            DatabaseType::PostgreSQL | DatabaseType::SQLite => IdFormat::Uuid,
            DatabaseType::MongoDB => IdFormat::ObjectId,
        }
    }
}

/// Shape of a backend-native user identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdFormat {
    /// Hyphenated UUID (versions 1-5)
    Uuid,
    /// 24 hexadecimal characters
    ObjectId,
}

impl IdFormat {
    pub fn is_valid(&self, id: &str) -> bool {
        match self {
            IdFormat::Uuid => UUID_PATTERN.is_match(id),
            IdFormat::ObjectId => OBJECT_ID_PATTERN.is_match(id),
        }
    }

    /// Reject malformed ids before any backend round trip
    pub fn validate(&self, id: &str) -> AppResult<()> {
        if self.is_valid(id) {
            Ok(())
        } else {
            Err(AppError::invalid_user_id())
        }
    }

    /// Generate a fresh identifier of this shape
    pub fn generate(&self) -> String {
        match self {
            IdFormat::Uuid => uuid::Uuid::new_v4().to_string(),
            IdFormat::ObjectId => mongodb::bson::oid::ObjectId::new().to_hex(),
        }
    }
}

/// Storage lifecycle shared by every backend
#[async_trait]
pub trait Backend: Send + Sync {
    /// Connect and initialize the storage backend
    async fn connect(config: &DatabaseBackendConfig) -> AppResult<Self>
    where
        Self: Sized;

    fn database_type(&self) -> DatabaseType;

    fn id_format(&self) -> IdFormat {
        self.database_type().id_format()
    }

    /// Issue a trivial read to confirm the backend is reachable
    async fn health_check(&self) -> AppResult<()>;

    /// Create tables / collections and the unique email constraint
    async fn init_schema(&self) -> AppResult<()>;

    /// Release the connection pool or client
    async fn close(&self) -> AppResult<()> {
        Ok(())
    }
}

/// The persistence-agnostic User contract.
///
/// Every operation reports "not found" as `Ok(None)` / `Ok(false)`, and
/// failures as one of `Conflict`, `InvalidIdentifier` or a server-side
/// error; backend-native exceptions never cross this boundary.
#[async_trait]
pub trait UserRepository: Backend {
    /// Persist a new user with a generated id and equal timestamps
    async fn create_user(&self, input: &CreateUserRequest) -> AppResult<User>;

    /// Users ordered newest first
    async fn find_all_users(&self, limit: i64, skip: i64) -> AppResult<Vec<User>>;

    /// Total number of users, irrespective of pagination
    async fn count_users(&self) -> AppResult<i64>;

    async fn find_user_by_id(&self, id: &str) -> AppResult<Option<User>>;

    async fn find_user_by_email(&self, email: &str) -> AppResult<Option<User>>;

    /// Merge the provided fields into the stored user
    async fn update_user(&self, id: &str, patch: &UpdateUserRequest) -> AppResult<Option<User>>;

    /// Returns whether a user was removed
    async fn delete_user(&self, id: &str) -> AppResult<bool>;
}

/// Factory for creating backend instances
pub struct BackendFactory;

impl BackendFactory {
    /// Create a backend based on configuration
    pub async fn create(config: &DatabaseBackendConfig) -> AppResult<Arc<dyn UserRepository>> {
        let backend = Self::create_backend(config).await?;
        Ok(Arc::from(backend))
    }

    /// Create a backend based on configuration (returns Box)
    ///
    /// The returned backend is connected and its schema initialized.
    pub async fn create_backend(
        config: &DatabaseBackendConfig,
    ) -> AppResult<Box<dyn UserRepository>> {
        let backend: Box<dyn UserRepository> = match config.database_type {
            DatabaseType::PostgreSQL => {
                Box::new(database::postgres::PostgresBackend::connect(config).await?)
            }
            DatabaseType::SQLite => {
                Box::new(database::sqlite::SqliteBackend::connect(config).await?)
            }
            DatabaseType::MongoDB => {
                Box::new(database::mongo::MongoBackend::connect(config).await?)
            }
        };

        backend.init_schema().await?;
        Ok(backend)
    }
}
