use std::sync::Arc;

use crate::backend::UserRepository;
use crate::config::AppConfig;

pub mod health;
pub mod user;

/// Shared handler state: the backend chosen at startup plus the loaded config
pub type AppState = (Arc<dyn UserRepository>, Arc<AppConfig>);
