use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::backend::IdFormat;
use crate::error::AppResult;
use crate::models::{UpdateUserRequest, User};

/// Common trait for user update operations across different database backends
#[async_trait]
pub trait UserUpdater: Send + Sync {
    /// Merge the patch into the stored user.
    ///
    /// Returns `None` when no user has the id; a clash with another user's
    /// email must surface as `AppError::Conflict`.
    async fn execute_user_update(&self, data: PreparedUserUpdateData) -> AppResult<Option<User>>;
}

/// Prepared data for a merge update
pub struct PreparedUserUpdateData {
    pub id: String,
    pub patch: UpdateUserRequest,
    pub timestamp: DateTime<Utc>,
}

/// Processor for common user update business logic
pub struct UserUpdateProcessor;

impl UserUpdateProcessor {
    /// Attach the refreshed updatedAt to the patch
    pub fn prepare_user_for_update(id: &str, patch: &UpdateUserRequest) -> PreparedUserUpdateData {
        PreparedUserUpdateData {
            id: id.to_string(),
            patch: patch.clone(),
            timestamp: crate::utils::current_timestamp(),
        }
    }
}

/// Unified user update operations handler
///
/// This provides a consistent interface for user update operations
/// while delegating to database-specific implementations.
pub struct UnifiedUserUpdateOps<T: UserUpdater> {
    updater: T,
    id_format: IdFormat,
}

impl<T: UserUpdater> UnifiedUserUpdateOps<T> {
    pub fn new(updater: T, id_format: IdFormat) -> Self {
        Self { updater, id_format }
    }

    pub async fn update_user(
        &self,
        id: &str,
        patch: &UpdateUserRequest,
    ) -> AppResult<Option<User>> {
        self.id_format.validate(id)?;

        let prepared = UserUpdateProcessor::prepare_user_for_update(id, patch);
        self.updater.execute_user_update(prepared).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;

    struct EchoUpdater;

    #[async_trait]
    impl UserUpdater for EchoUpdater {
        async fn execute_user_update(
            &self,
            data: PreparedUserUpdateData,
        ) -> AppResult<Option<User>> {
            Ok(Some(User {
                id: data.id,
                name: data.patch.name.unwrap_or_default(),
                email: data.patch.email.unwrap_or_default(),
                age: data.patch.age,
                phone: None,
                address: None,
                created_at: data.timestamp,
                updated_at: data.timestamp,
            }))
        }
    }

    #[test]
    fn test_prepare_user_for_update() {
        let patch = UpdateUserRequest {
            age: Some(41),
            ..Default::default()
        };

        let prepared = UserUpdateProcessor::prepare_user_for_update("an-id", &patch);
        assert_eq!(prepared.id, "an-id");
        assert_eq!(prepared.patch, patch);
        assert!(prepared.timestamp.timestamp() > 0);
    }

    #[tokio::test]
    async fn test_update_validates_id_first() {
        let ops = UnifiedUserUpdateOps::new(EchoUpdater, IdFormat::Uuid);
        let patch = UpdateUserRequest::default();

        let result = ops.update_user("507f1f77bcf86cd799439011", &patch).await;
        assert!(matches!(result, Err(AppError::InvalidIdentifier(_))));

        let id = IdFormat::Uuid.generate();
        let updated = ops.update_user(&id, &patch).await.unwrap().unwrap();
        assert_eq!(updated.id, id);
    }
}
