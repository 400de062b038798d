use async_trait::async_trait;
use mongodb::Collection;

use super::super::user_insert::{PreparedUserData, UserInserter};
use super::UserDocument;
use crate::error::{AppError, AppResult};
use crate::models::User;

/// MongoDB-specific implementation of UserInserter
pub struct MongoUserInserter {
    collection: Collection<UserDocument>,
}

impl MongoUserInserter {
    pub fn new(collection: Collection<UserDocument>) -> Self {
        Self { collection }
    }
}

#[async_trait]
impl UserInserter for MongoUserInserter {
    async fn execute_user_insert(&self, data: PreparedUserData) -> AppResult<User> {
        let document = UserDocument::from_prepared(&data)?;

        self.collection
            .insert_one(&document)
            .await
            .map_err(|e| AppError::from_mongodb(e, "Failed to insert user"))?;

        document.into_user()
    }
}
