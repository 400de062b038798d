use async_trait::async_trait;
use sqlx::SqlitePool;

use super::super::user_insert::{PreparedUserData, UserInserter};
use super::super::USERS_TABLE;
use crate::error::{AppError, AppResult};
use crate::models::User;

/// SQLite-specific implementation of UserInserter
pub struct SqliteUserInserter {
    pool: SqlitePool,
}

impl SqliteUserInserter {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserInserter for SqliteUserInserter {
    async fn execute_user_insert(&self, data: PreparedUserData) -> AppResult<User> {
        let sql = format!(
            "INSERT INTO {} (id, name, email, age, phone, address, created_at, updated_at) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?7)",
            USERS_TABLE
        );

        sqlx::query(&sql)
            .bind(&data.id)
            .bind(&data.name)
            .bind(&data.email)
            .bind(data.age)
            .bind(&data.phone)
            .bind(&data.address)
            .bind(data.timestamp)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::from_sqlx(e, "Failed to insert user"))?;

        Ok(data.to_user())
    }
}
