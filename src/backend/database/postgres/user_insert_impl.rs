use async_trait::async_trait;
use sqlx::PgPool;

use super::super::user_insert::{PreparedUserData, UserInserter};
use super::super::USERS_TABLE;
use super::{row_to_user, USER_COLUMNS};
use crate::error::{AppError, AppResult};
use crate::models::User;

/// PostgreSQL-specific implementation of UserInserter
pub struct PostgresUserInserter {
    pool: PgPool,
}

impl PostgresUserInserter {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserInserter for PostgresUserInserter {
    async fn execute_user_insert(&self, data: PreparedUserData) -> AppResult<User> {
        let sql = format!(
            "INSERT INTO {} (id, name, email, age, phone, address, created_at, updated_at) \
             VALUES ($1::uuid, $2, $3, $4, $5, $6, $7, $7) RETURNING {}",
            USERS_TABLE, USER_COLUMNS
        );

        let row = sqlx::query(&sql)
            .bind(&data.id)
            .bind(&data.name)
            .bind(&data.email)
            .bind(data.age)
            .bind(&data.phone)
            .bind(&data.address)
            .bind(data.timestamp)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::from_sqlx(e, "Failed to insert user"))?;

        row_to_user(&row)
    }
}
