use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson::doc;
use mongodb::Collection;

use super::super::user_read::UserReader;
use super::{parse_object_id, UserDocument};
use crate::error::{AppError, AppResult};
use crate::models::User;

/// MongoDB-specific implementation of UserReader
pub struct MongoUserReader {
    collection: Collection<UserDocument>,
}

impl MongoUserReader {
    pub fn new(collection: Collection<UserDocument>) -> Self {
        Self { collection }
    }
}

#[async_trait]
impl UserReader for MongoUserReader {
    async fn find_user_by_id(&self, id: &str) -> AppResult<Option<User>> {
        let object_id = parse_object_id(id)?;

        let document = self
            .collection
            .find_one(doc! { "_id": object_id })
            .await
            .map_err(|e| AppError::from_mongodb(e, "Failed to find user by id"))?;

        document.map(UserDocument::into_user).transpose()
    }

    async fn find_user_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let document = self
            .collection
            .find_one(doc! { "email": email })
            .await
            .map_err(|e| AppError::from_mongodb(e, "Failed to find user by email"))?;

        document.map(UserDocument::into_user).transpose()
    }

    async fn find_all_users(&self, limit: i64, skip: i64) -> AppResult<Vec<User>> {
        let cursor = self
            .collection
            .find(doc! {})
            .sort(doc! { "createdAt": -1, "_id": -1 })
            .skip(skip.max(0) as u64)
            .limit(limit)
            .await
            .map_err(|e| AppError::from_mongodb(e, "Failed to list users"))?;

        let documents: Vec<UserDocument> = cursor
            .try_collect()
            .await
            .map_err(|e| AppError::from_mongodb(e, "Failed to read user cursor"))?;

        documents.into_iter().map(UserDocument::into_user).collect()
    }

    async fn count_users(&self) -> AppResult<i64> {
        let count = self
            .collection
            .count_documents(doc! {})
            .await
            .map_err(|e| AppError::from_mongodb(e, "Failed to count users"))?;

        Ok(count as i64)
    }
}
