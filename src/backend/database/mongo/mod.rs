//! MongoDB strategy
//!
//! Ids are native ObjectIds surfaced as 24-character hex strings. Timestamps
//! are stored as BSON dates, so they carry millisecond precision.

mod backend_impl;
mod document;
mod schema;
mod user_delete_impl;
mod user_insert_impl;
mod user_read_impl;
mod user_update_impl;

pub use backend_impl::MongoBackend;
pub use document::UserDocument;
pub use user_delete_impl::MongoUserDeleter;
pub use user_insert_impl::MongoUserInserter;
pub use user_read_impl::MongoUserReader;
pub use user_update_impl::MongoUserUpdater;

use mongodb::bson::oid::ObjectId;

use crate::error::{AppError, AppResult};

/// Parse an id that has already passed `IdFormat::ObjectId` validation
pub(crate) fn parse_object_id(id: &str) -> AppResult<ObjectId> {
    ObjectId::parse_str(id).map_err(|_| AppError::invalid_user_id())
}
