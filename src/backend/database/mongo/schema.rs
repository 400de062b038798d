use mongodb::bson::doc;
use mongodb::options::IndexOptions;
use mongodb::{Collection, IndexModel};

use super::UserDocument;
use crate::error::{AppError, AppResult};

/// Create the indexes the users collection relies on
///
/// The unique index on `email` is the only duplicate guard.
pub async fn init_indexes(collection: &Collection<UserDocument>) -> AppResult<()> {
    let email_index = IndexModel::builder()
        .keys(doc! { "email": 1 })
        .options(
            IndexOptions::builder()
                .unique(true)
                .name("email_unique".to_string())
                .build(),
        )
        .build();

    collection
        .create_index(email_index)
        .await
        .map_err(|e| AppError::from_mongodb(e, "Failed to create email index"))?;

    let created_index = IndexModel::builder()
        .keys(doc! { "createdAt": -1, "_id": -1 })
        .options(
            IndexOptions::builder()
                .name("created_at_desc".to_string())
                .build(),
        )
        .build();

    collection
        .create_index(created_index)
        .await
        .map_err(|e| AppError::from_mongodb(e, "Failed to create createdAt index"))?;

    Ok(())
}
