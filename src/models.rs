use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The User resource as surfaced over HTTP, independent of storage backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Payload for `POST /users`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateUserRequest {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub age: Option<i32>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
}

/// Payload for `PUT /users/{id}`
///
/// Name and email are mandatory, but the update is still merged: optional
/// fields left out of the body keep their stored values.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReplaceUserRequest {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub age: Option<i32>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
}

/// Payload for `PATCH /users/{id}`; also the patch type every backend applies
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateUserRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub age: Option<i32>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
}

impl UpdateUserRequest {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.email.is_none()
            && self.age.is_none()
            && self.phone.is_none()
            && self.address.is_none()
    }
}

impl From<ReplaceUserRequest> for UpdateUserRequest {
    fn from(req: ReplaceUserRequest) -> Self {
        Self {
            name: Some(req.name),
            email: Some(req.email),
            age: req.age,
            phone: req.phone,
            address: req.address,
        }
    }
}

/// Query string for `GET /users`; `take` is accepted as an alias of `limit`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListUsersQuery {
    #[serde(default, alias = "take")]
    pub limit: Option<i64>,
    #[serde(default)]
    pub skip: Option<i64>,
}

/// Page of users plus the effective pagination values
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserList {
    pub users: Vec<User>,
    pub total: i64,
    pub limit: i64,
    pub skip: i64,
}

/// Uniform `{success, message, data}` response envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub message: String,
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn success(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: Some(data),
        }
    }
}

impl ApiResponse<()> {
    /// Successful outcome that carries no payload (`data: null`)
    pub fn empty(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: None,
        }
    }
}
