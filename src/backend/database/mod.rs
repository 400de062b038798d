//! Database abstraction layer for the user service
//!
//! This module provides a unified interface for user operations across
//! different storage backends (PostgreSQL, SQLite, MongoDB) while keeping
//! backend-specific code isolated.
//!
//! # Architecture
//!
//! ```text
//! Common logic (user_insert.rs, user_read.rs, user_update.rs, user_delete.rs)
//!     ↓
//! Backend-specific implementations
//!     ├── postgres/ (PostgreSQL via sqlx)
//!     ├── sqlite/   (SQLite via sqlx)
//!     └── mongo/    (MongoDB via the official driver)
//! ```

pub mod config;
pub mod mongo;
pub mod postgres;
pub mod sqlite;
pub mod user_delete;
pub mod user_insert;
pub mod user_read;
pub mod user_update;

#[cfg(test)]
mod integration_test;

/// Table (or collection) holding users in every backend
pub const USERS_TABLE: &str = "users";

// Re-export key types for convenience
pub use config::DatabaseBackendConfig;

pub use user_insert::UnifiedUserInsertOps;

pub use user_delete::UnifiedUserDeleteOps;

pub use user_update::UnifiedUserUpdateOps;

pub use user_read::UnifiedUserReadOps;

pub use mongo::{MongoUserDeleter, MongoUserInserter, MongoUserReader, MongoUserUpdater};
pub use postgres::{
    PostgresUserDeleter, PostgresUserInserter, PostgresUserReader, PostgresUserUpdater,
};
pub use sqlite::{SqliteUserDeleter, SqliteUserInserter, SqliteUserReader, SqliteUserUpdater};
