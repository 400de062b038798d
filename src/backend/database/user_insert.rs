use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::backend::IdFormat;
use crate::error::AppResult;
use crate::models::{CreateUserRequest, User};

/// Prepared user data for database insertion
/// Contains the generated id and the shared creation timestamp
#[derive(Debug, Clone)]
pub struct PreparedUserData {
    pub id: String,
    pub name: String,
    pub email: String,
    pub age: Option<i32>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub timestamp: DateTime<Utc>,
}

impl PreparedUserData {
    /// The user exactly as it will be stored
    pub fn to_user(&self) -> User {
        User {
            id: self.id.clone(),
            name: self.name.clone(),
            email: self.email.clone(),
            age: self.age,
            phone: self.phone.clone(),
            address: self.address.clone(),
            created_at: self.timestamp,
            updated_at: self.timestamp,
        }
    }
}

/// Database-specific adapter for user INSERT operations
#[async_trait]
pub trait UserInserter: Send + Sync {
    /// Execute user insert and return the created user.
    /// A duplicate email must surface as `AppError::Conflict`.
    async fn execute_user_insert(&self, data: PreparedUserData) -> AppResult<User>;
}

/// Shared business logic for user INSERT operations
pub struct UserInsertProcessor;

impl UserInsertProcessor {
    /// Prepare user data for database insertion
    ///
    /// This handles all common processing:
    /// - ID generation in the backend's native shape
    /// - a single timestamp for both createdAt and updatedAt
    pub fn prepare_user_for_insert(
        input: &CreateUserRequest,
        id_format: IdFormat,
    ) -> PreparedUserData {
        PreparedUserData {
            id: id_format.generate(),
            name: input.name.clone(),
            email: input.email.clone(),
            age: input.age,
            phone: input.phone.clone(),
            address: input.address.clone(),
            timestamp: crate::utils::current_timestamp(),
        }
    }
}

/// Unified user INSERT operations using the adapter pattern
pub struct UnifiedUserInsertOps<T: UserInserter> {
    inserter: T,
    id_format: IdFormat,
}

impl<T: UserInserter> UnifiedUserInsertOps<T> {
    pub fn new(inserter: T, id_format: IdFormat) -> Self {
        Self {
            inserter,
            id_format,
        }
    }

    /// Create a new user using shared logic and database-specific execution
    pub async fn create_user(&self, input: &CreateUserRequest) -> AppResult<User> {
        let prepared = UserInsertProcessor::prepare_user_for_insert(input, self.id_format);
        self.inserter.execute_user_insert(prepared).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prepare_user_for_insert() {
        let input = CreateUserRequest {
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            age: Some(36),
            ..Default::default()
        };

        let prepared = UserInsertProcessor::prepare_user_for_insert(&input, IdFormat::Uuid);
        assert!(IdFormat::Uuid.is_valid(&prepared.id));
        assert_eq!(prepared.name, "Ada");
        assert_eq!(prepared.age, Some(36));
        assert!(prepared.timestamp > Utc::now() - chrono::Duration::seconds(1));

        let user = prepared.to_user();
        assert_eq!(user.created_at, user.updated_at);
        assert_eq!(user.id, prepared.id);
    }

    #[test]
    fn test_prepare_generates_object_ids_for_document_stores() {
        let input = CreateUserRequest {
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            ..Default::default()
        };

        let first = UserInsertProcessor::prepare_user_for_insert(&input, IdFormat::ObjectId);
        let second = UserInsertProcessor::prepare_user_for_insert(&input, IdFormat::ObjectId);
        assert!(IdFormat::ObjectId.is_valid(&first.id));
        assert_ne!(first.id, second.id);
    }
}
