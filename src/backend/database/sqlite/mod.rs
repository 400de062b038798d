//! SQLite strategy
//!
//! Ids are stored as TEXT UUIDs and timestamps as RFC 3339 text; ordering
//! ties on `created_at` are broken by `rowid`.

mod backend_impl;
mod schema;
mod user_delete_impl;
mod user_insert_impl;
mod user_read_impl;
mod user_update_impl;

use sqlx::sqlite::SqliteRow;
use sqlx::Row;

use crate::error::{AppError, AppResult};
use crate::models::User;

pub use backend_impl::SqliteBackend;
pub use user_delete_impl::SqliteUserDeleter;
pub use user_insert_impl::SqliteUserInserter;
pub use user_read_impl::SqliteUserReader;
pub use user_update_impl::SqliteUserUpdater;

pub(crate) const USER_COLUMNS: &str =
    "id, name, email, age, phone, address, created_at, updated_at";

pub(crate) fn row_to_user(row: &SqliteRow) -> AppResult<User> {
    let decode = |e: sqlx::Error| AppError::Database(format!("Failed to decode user row: {}", e));

    Ok(User {
        id: row.try_get("id").map_err(decode)?,
        name: row.try_get("name").map_err(decode)?,
        email: row.try_get("email").map_err(decode)?,
        age: row.try_get("age").map_err(decode)?,
        phone: row.try_get("phone").map_err(decode)?,
        address: row.try_get("address").map_err(decode)?,
        created_at: row.try_get("created_at").map_err(decode)?,
        updated_at: row.try_get("updated_at").map_err(decode)?,
    })
}
