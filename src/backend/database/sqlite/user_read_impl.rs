use async_trait::async_trait;
use sqlx::SqlitePool;

use super::super::user_read::UserReader;
use super::super::USERS_TABLE;
use super::{row_to_user, USER_COLUMNS};
use crate::error::{AppError, AppResult};
use crate::models::User;

/// SQLite-specific implementation of UserReader
pub struct SqliteUserReader {
    pool: SqlitePool,
}

impl SqliteUserReader {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserReader for SqliteUserReader {
    async fn find_user_by_id(&self, id: &str) -> AppResult<Option<User>> {
        let sql = format!("SELECT {} FROM {} WHERE id = ?1", USER_COLUMNS, USERS_TABLE);

        let row = sqlx::query(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::from_sqlx(e, "Failed to find user by id"))?;

        row.as_ref().map(row_to_user).transpose()
    }

    async fn find_user_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let sql = format!("SELECT {} FROM {} WHERE email = ?1", USER_COLUMNS, USERS_TABLE);

        let row = sqlx::query(&sql)
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::from_sqlx(e, "Failed to find user by email"))?;

        row.as_ref().map(row_to_user).transpose()
    }

    async fn find_all_users(&self, limit: i64, skip: i64) -> AppResult<Vec<User>> {
        let sql = format!(
            "SELECT {} FROM {} ORDER BY created_at DESC, rowid DESC LIMIT ?1 OFFSET ?2",
            USER_COLUMNS, USERS_TABLE
        );

        let rows = sqlx::query(&sql)
            .bind(limit)
            .bind(skip)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::from_sqlx(e, "Failed to list users"))?;

        rows.iter().map(row_to_user).collect()
    }

    async fn count_users(&self) -> AppResult<i64> {
        let sql = format!("SELECT COUNT(*) FROM {}", USERS_TABLE);

        sqlx::query_scalar(&sql)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::from_sqlx(e, "Failed to count users"))
    }
}
