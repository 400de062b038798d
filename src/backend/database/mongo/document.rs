use chrono::{DateTime, Utc};
use mongodb::bson::{self, doc, oid::ObjectId, Document};
use serde::{Deserialize, Serialize};

use super::parse_object_id;
use crate::backend::database::user_insert::PreparedUserData;
use crate::error::{AppError, AppResult};
use crate::models::{UpdateUserRequest, User};

/// Stored shape of a user in the `users` collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDocument {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    pub created_at: bson::DateTime,
    pub updated_at: bson::DateTime,
}

pub(crate) fn to_bson_datetime(timestamp: DateTime<Utc>) -> bson::DateTime {
    bson::DateTime::from_millis(timestamp.timestamp_millis())
}

fn to_chrono(value: bson::DateTime) -> AppResult<DateTime<Utc>> {
    DateTime::from_timestamp_millis(value.timestamp_millis()).ok_or_else(|| {
        AppError::Database(format!("Stored timestamp out of range: {}", value))
    })
}

impl UserDocument {
    pub fn from_prepared(data: &PreparedUserData) -> AppResult<Self> {
        let timestamp = to_bson_datetime(data.timestamp);

        Ok(Self {
            id: parse_object_id(&data.id)?,
            name: data.name.clone(),
            email: data.email.clone(),
            age: data.age,
            phone: data.phone.clone(),
            address: data.address.clone(),
            created_at: timestamp,
            updated_at: timestamp,
        })
    }

    pub fn into_user(self) -> AppResult<User> {
        Ok(User {
            id: self.id.to_hex(),
            name: self.name,
            email: self.email,
            age: self.age,
            phone: self.phone,
            address: self.address,
            created_at: to_chrono(self.created_at)?,
            updated_at: to_chrono(self.updated_at)?,
        })
    }
}

/// `$set` document holding only the fields present in the patch
pub(crate) fn set_document(patch: &UpdateUserRequest, timestamp: DateTime<Utc>) -> Document {
    let mut set = doc! { "updatedAt": to_bson_datetime(timestamp) };

    if let Some(name) = &patch.name {
        set.insert("name", name.as_str());
    }
    if let Some(email) = &patch.email {
        set.insert("email", email.as_str());
    }
    if let Some(age) = patch.age {
        set.insert("age", age);
    }
    if let Some(phone) = &patch.phone {
        set.insert("phone", phone.as_str());
    }
    if let Some(address) = &patch.address {
        set.insert("address", address.as_str());
    }

    set
}
