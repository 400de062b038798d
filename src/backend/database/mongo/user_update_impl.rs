use async_trait::async_trait;
use mongodb::bson::doc;
use mongodb::options::ReturnDocument;
use mongodb::Collection;

use super::super::user_update::{PreparedUserUpdateData, UserUpdater};
use super::document::set_document;
use super::{parse_object_id, UserDocument};
use crate::error::{AppError, AppResult};
use crate::models::User;

/// MongoDB-specific implementation of UserUpdater
///
/// The merge is a single `findOneAndUpdate` with `$set` of the provided
/// fields, returning the post-update document.
pub struct MongoUserUpdater {
    collection: Collection<UserDocument>,
}

impl MongoUserUpdater {
    pub fn new(collection: Collection<UserDocument>) -> Self {
        Self { collection }
    }
}

#[async_trait]
impl UserUpdater for MongoUserUpdater {
    async fn execute_user_update(&self, data: PreparedUserUpdateData) -> AppResult<Option<User>> {
        let object_id = parse_object_id(&data.id)?;
        let set = set_document(&data.patch, data.timestamp);

        let document = self
            .collection
            .find_one_and_update(doc! { "_id": object_id }, doc! { "$set": set })
            .return_document(ReturnDocument::After)
            .await
            .map_err(|e| AppError::from_mongodb(e, "Failed to update user"))?;

        document.map(UserDocument::into_user).transpose()
    }
}
