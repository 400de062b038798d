use async_trait::async_trait;
use sqlx::PgPool;

use super::super::user_delete::UserDeleter;
use super::super::USERS_TABLE;
use crate::error::{AppError, AppResult};

/// PostgreSQL-specific implementation of UserDeleter
pub struct PostgresUserDeleter {
    pool: PgPool,
}

impl PostgresUserDeleter {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserDeleter for PostgresUserDeleter {
    async fn execute_user_delete(&self, id: &str) -> AppResult<bool> {
        let sql = format!("DELETE FROM {} WHERE id = $1::uuid", USERS_TABLE);

        let result = sqlx::query(&sql)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::from_sqlx(e, "Failed to delete user"))?;

        Ok(result.rows_affected() > 0)
    }
}
