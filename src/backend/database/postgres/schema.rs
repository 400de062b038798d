use crate::backend::database::USERS_TABLE;
use crate::error::{AppError, AppResult};
use sqlx::PgPool;

/// Initialize the users table for PostgreSQL
///
/// The `UNIQUE` constraint on `email` is the only duplicate guard; inserts
/// and updates rely on it instead of checking first.
pub async fn init_schema(pool: &PgPool) -> AppResult<()> {
    let users_sql = format!(
        r#"
        CREATE TABLE IF NOT EXISTS {} (
            id UUID PRIMARY KEY,
            seq BIGSERIAL NOT NULL,
            name VARCHAR(100) NOT NULL,
            email VARCHAR(255) NOT NULL UNIQUE,
            age INTEGER CHECK (age IS NULL OR (age >= 0 AND age <= 150)),
            phone TEXT,
            address TEXT,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            updated_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW()
        )
        "#,
        USERS_TABLE
    );

    sqlx::query(&users_sql)
        .execute(pool)
        .await
        .map_err(|e| AppError::Database(format!("Failed to create users table: {}", e)))?;

    let index_sql = format!(
        "CREATE INDEX IF NOT EXISTS idx_{0}_created_at ON {0} (created_at DESC, seq DESC)",
        USERS_TABLE
    );

    sqlx::query(&index_sql)
        .execute(pool)
        .await
        .map_err(|e| AppError::Database(format!("Failed to create created_at index: {}", e)))?;

    Ok(())
}
