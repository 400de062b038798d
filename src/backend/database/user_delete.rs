use async_trait::async_trait;

use crate::backend::IdFormat;
use crate::error::AppResult;

/// Database-specific adapter for user DELETE operations
#[async_trait]
pub trait UserDeleter: Send + Sync {
    /// Execute user delete and return whether the user was found and deleted
    async fn execute_user_delete(&self, id: &str) -> AppResult<bool>;
}

/// Unified user DELETE operations using the adapter pattern
pub struct UnifiedUserDeleteOps<T: UserDeleter> {
    deleter: T,
    id_format: IdFormat,
}

impl<T: UserDeleter> UnifiedUserDeleteOps<T> {
    pub fn new(deleter: T, id_format: IdFormat) -> Self {
        Self { deleter, id_format }
    }

    /// Delete a user; a missing user is `Ok(false)`, a malformed id an error
    pub async fn delete_user(&self, id: &str) -> AppResult<bool> {
        self.id_format.validate(id)?;
        self.deleter.execute_user_delete(id).await
    }
}
