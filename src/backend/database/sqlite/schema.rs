use crate::backend::database::USERS_TABLE;
use crate::error::{AppError, AppResult};
use sqlx::SqlitePool;

/// Initialize the users table for SQLite
pub async fn init_schema(pool: &SqlitePool) -> AppResult<()> {
    let users_sql = format!(
        r#"
        CREATE TABLE IF NOT EXISTS {} (
            id TEXT PRIMARY KEY,
            name TEXT NOT NULL,
            email TEXT NOT NULL UNIQUE,
            age INTEGER CHECK (age IS NULL OR (age >= 0 AND age <= 150)),
            phone TEXT,
            address TEXT,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        )
        "#,
        USERS_TABLE
    );

    sqlx::query(&users_sql)
        .execute(pool)
        .await
        .map_err(|e| AppError::Database(format!("Failed to create users table: {}", e)))?;

    let index_sql = format!(
        "CREATE INDEX IF NOT EXISTS idx_{0}_created_at ON {0} (created_at)",
        USERS_TABLE
    );

    sqlx::query(&index_sql)
        .execute(pool)
        .await
        .map_err(|e| AppError::Database(format!("Failed to create created_at index: {}", e)))?;

    Ok(())
}
