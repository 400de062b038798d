use async_trait::async_trait;
use sqlx::SqlitePool;

use super::super::user_update::{PreparedUserUpdateData, UserUpdater};
use super::super::USERS_TABLE;
use super::{row_to_user, USER_COLUMNS};
use crate::error::{AppError, AppResult};
use crate::models::User;

/// SQLite-specific implementation of UserUpdater
pub struct SqliteUserUpdater {
    pool: SqlitePool,
}

impl SqliteUserUpdater {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserUpdater for SqliteUserUpdater {
    async fn execute_user_update(&self, data: PreparedUserUpdateData) -> AppResult<Option<User>> {
        let sql = format!(
            "UPDATE {} SET \
                name = COALESCE(?2, name), \
                email = COALESCE(?3, email), \
                age = COALESCE(?4, age), \
                phone = COALESCE(?5, phone), \
                address = COALESCE(?6, address), \
                updated_at = ?7 \
             WHERE id = ?1 RETURNING {}",
            USERS_TABLE, USER_COLUMNS
        );

        let patch = &data.patch;
        let row = sqlx::query(&sql)
            .bind(&data.id)
            .bind(&patch.name)
            .bind(&patch.email)
            .bind(patch.age)
            .bind(&patch.phone)
            .bind(&patch.address)
            .bind(data.timestamp)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::from_sqlx(e, "Failed to update user"))?;

        row.as_ref().map(row_to_user).transpose()
    }
}
