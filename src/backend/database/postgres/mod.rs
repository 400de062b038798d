//! PostgreSQL strategy
//!
//! Ids are native `UUID` columns surfaced as text; ordering ties on
//! `created_at` are broken by a `BIGSERIAL` insertion counter.

mod backend_impl;
mod schema;
mod user_delete_impl;
mod user_insert_impl;
mod user_read_impl;
mod user_update_impl;

use sqlx::postgres::PgRow;
use sqlx::Row;

use crate::error::{AppError, AppResult};
use crate::models::User;

pub use backend_impl::PostgresBackend;
pub use user_delete_impl::PostgresUserDeleter;
pub use user_insert_impl::PostgresUserInserter;
pub use user_read_impl::PostgresUserReader;
pub use user_update_impl::PostgresUserUpdater;

/// Projection shared by every query returning users
pub(crate) const USER_COLUMNS: &str =
    "id::text AS id, name, email, age, phone, address, created_at, updated_at";

pub(crate) fn row_to_user(row: &PgRow) -> AppResult<User> {
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
