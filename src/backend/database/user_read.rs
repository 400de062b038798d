//! User read operations
//!
//! This module provides common interfaces for user read operations
//! that work across different database backends.

use async_trait::async_trait;

use crate::backend::IdFormat;
use crate::error::{AppError, AppResult};
use crate::models::User;

/// Trait for user read operations
#[async_trait]
pub trait UserReader: Send + Sync {
    /// Find a user by an already validated ID
    async fn find_user_by_id(&self, id: &str) -> AppResult<Option<User>>;

    /// Find a user by exact email
    async fn find_user_by_email(&self, email: &str) -> AppResult<Option<User>>;

    /// Page of users, newest first
    async fn find_all_users(&self, limit: i64, skip: i64) -> AppResult<Vec<User>>;

    async fn count_users(&self) -> AppResult<i64>;
}

/// Shared checks for read operations
pub struct UserReadProcessor;

impl UserReadProcessor {
    pub fn validate_pagination(limit: i64, skip: i64) -> AppResult<()> {
        if limit < 1 {
            return Err(AppError::Validation(
                "limit must be greater than or equal to 1".to_string(),
            ));
        }
        if skip < 0 {
            return Err(AppError::Validation(
                "skip must be greater than or equal to 0".to_string(),
            ));
        }
        Ok(())
    }
}

/// Unified user read operations
///
/// This struct provides a unified interface for user read operations
/// that can work with any database backend implementation.
pub struct UnifiedUserReadOps<T: UserReader> {
    reader: T,
    id_format: IdFormat,
}

impl<T: UserReader> UnifiedUserReadOps<T> {
    pub fn new(reader: T, id_format: IdFormat) -> Self {
        Self { reader, id_format }
    }

    /// Find a user by ID, rejecting malformed ids before touching storage
    pub async fn find_user_by_id(&self, id: &str) -> AppResult<Option<User>> {
        self.id_format.validate(id)?;
        self.reader.find_user_by_id(id).await
    }

    pub async fn find_user_by_email(&self, email: &str) -> AppResult<Option<User>> {
        self.reader.find_user_by_email(email).await
    }

    pub async fn find_all_users(&self, limit: i64, skip: i64) -> AppResult<Vec<User>> {
        UserReadProcessor::validate_pagination(limit, skip)?;
        self.reader.find_all_users(limit, skip).await
    }

    pub async fn count_users(&self) -> AppResult<i64> {
        self.reader.count_users().await
    }
}
