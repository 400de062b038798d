use axum::{http::StatusCode, Json};
use serde_json::{json, Value};
use std::fmt;
use tracing::error;

/// MongoDB server error code for a duplicate key on a unique index
const MONGO_DUPLICATE_KEY: i32 = 11000;

#[derive(Debug)]
pub enum AppError {
    /// Another user already owns the email address
    Conflict(String),
    /// The identifier does not match the backend's id shape
    InvalidIdentifier(String),
    Validation(String),
    BackendUnavailable(String),
    Database(String),
    Configuration(String),
    Internal(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Conflict(e) => write!(f, "Conflict: {}", e),
            AppError::InvalidIdentifier(e) => write!(f, "Invalid identifier: {}", e),
            AppError::Validation(e) => write!(f, "Validation error: {}", e),
            AppError::BackendUnavailable(e) => write!(f, "Backend unavailable: {}", e),
            AppError::Database(e) => write!(f, "Database error: {}", e),
            AppError::Configuration(e) => write!(f, "Configuration error: {}", e),
            AppError::Internal(e) => write!(f, "Internal error: {}", e),
        }
    }
}

impl std::error::Error for AppError {}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Internal(err.to_string())
    }
}

pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    /// Duplicate email, regardless of which backend reported it
    pub fn email_conflict() -> Self {
        AppError::Conflict("User with this email already exists".to_string())
    }

    pub fn invalid_user_id() -> Self {
        AppError::InvalidIdentifier("Invalid user ID format".to_string())
    }

    /// Translate a sqlx failure into the closed error set.
    ///
    /// Unique violations are detected from the driver's structured error
    /// code rather than from the message text.
    pub fn from_sqlx(err: sqlx::Error, context: &str) -> Self {
        if let Some(db_err) = err.as_database_error() {
            if db_err.is_unique_violation() {
                return AppError::email_conflict();
            }
        }

        match err {
            sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
                AppError::BackendUnavailable(format!("{}: {}", context, err))
            }
            _ => AppError::Database(format!("{}: {}", context, err)),
        }
    }

    /// Translate a MongoDB driver failure into the closed error set
    pub fn from_mongodb(err: mongodb::error::Error, context: &str) -> Self {
        use mongodb::error::{ErrorKind, WriteFailure};

        match err.kind.as_ref() {
            ErrorKind::Write(WriteFailure::WriteError(write_err))
                if write_err.code == MONGO_DUPLICATE_KEY =>
            {
                AppError::email_conflict()
            }
            ErrorKind::Command(command_err) if command_err.code == MONGO_DUPLICATE_KEY => {
                AppError::email_conflict()
            }
            ErrorKind::ServerSelection { .. } | ErrorKind::Io(_) => {
                AppError::BackendUnavailable(format!("{}: {}", context, err))
            }
            _ => AppError::Database(format!("{}: {}", context, err)),
        }
    }

    /// Render the error as an HTTP status plus failure envelope.
    ///
    /// Server-side failures never leak their cause in the message; when
    /// `expose_details` is set (non-production) the cause is attached under
    /// an `error` key.
    pub fn to_response(&self, expose_details: bool) -> (StatusCode, Json<Value>) {
        let (status, message) = match self {
            AppError::Conflict(e) => (StatusCode::CONFLICT, e.clone()),
            AppError::InvalidIdentifier(e) => (StatusCode::BAD_REQUEST, e.clone()),
            AppError::Validation(e) => (StatusCode::BAD_REQUEST, e.clone()),
            _ => {
                error!("Request failed: {}", self);
                let mut body = json!({
                    "success": false,
                    "message": "Internal server error",
                });
                if expose_details {
                    body["error"] = json!(self.to_string());
                }
                return (StatusCode::INTERNAL_SERVER_ERROR, Json(body));
            }
        };

        (status, Json(failure_body(&message)))
    }
}

/// Failure envelope shared by every 4xx response
pub fn failure_body(message: &str) -> Value {
    json!({
        "success": false,
        "message": message,
        "data": null,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conflict_maps_to_409() {
        let (status, Json(body)) = AppError::email_conflict().to_response(false);
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["success"], false);
        assert_eq!(body["message"], "User with this email already exists");
        assert!(body["data"].is_null());
    }

    #[test]
    fn test_invalid_identifier_maps_to_400() {
        let (status, Json(body)) = AppError::invalid_user_id().to_response(false);
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Invalid user ID format");
    }

    #[test]
    fn test_database_error_hides_detail_in_production() {
        let err = AppError::Database("relation \"users\" does not exist".to_string());

        let (status, Json(body)) = err.to_response(false);
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["message"], "Internal server error");
        assert!(body.get("error").is_none());
        assert!(body.get("data").is_none());

        let (_, Json(body)) = err.to_response(true);
        assert!(body["error"].as_str().unwrap().contains("does not exist"));
    }

    #[test]
    fn test_backend_unavailable_is_server_error() {
        let (status, _) = AppError::BackendUnavailable("pool closed".to_string()).to_response(true);
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_sqlx_pool_errors_are_unavailable() {
        let err = AppError::from_sqlx(sqlx::Error::PoolClosed, "Failed to count users");
        assert!(matches!(err, AppError::BackendUnavailable(_)));

        let err = AppError::from_sqlx(sqlx::Error::RowNotFound, "Failed to find user");
        assert!(matches!(err, AppError::Database(_)));
    }
}
