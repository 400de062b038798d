use async_trait::async_trait;
use mongodb::bson::doc;
use mongodb::Collection;

use super::super::user_delete::UserDeleter;
use super::{parse_object_id, UserDocument};
use crate::error::{AppError, AppResult};

/// MongoDB-specific implementation of UserDeleter
pub struct MongoUserDeleter {
    collection: Collection<UserDocument>,
}

impl MongoUserDeleter {
    pub fn new(collection: Collection<UserDocument>) -> Self {
        Self { collection }
    }
}

#[async_trait]
impl UserDeleter for MongoUserDeleter {
    async fn execute_user_delete(&self, id: &str) -> AppResult<bool> {
        let object_id = parse_object_id(id)?;

        let result = self
            .collection
            .delete_one(doc! { "_id": object_id })
            .await
            .map_err(|e| AppError::from_mongodb(e, "Failed to delete user"))?;

        Ok(result.deleted_count > 0)
    }
}
