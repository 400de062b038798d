pub mod backend;
pub mod config;
pub mod error;
pub mod extractors;
pub mod logging;
pub mod models;
pub mod resource;
pub mod schema;
pub mod startup;
pub mod utils;

// Re-export commonly used types for easier access
pub use backend::{BackendFactory, DatabaseType, IdFormat, UserRepository};
pub use error::{AppError, AppResult};
pub use models::User;
