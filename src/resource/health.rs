use axum::{extract::State, http::StatusCode, Json};
use serde_json::{json, Value};
use tracing::warn;

use super::AppState;

/// Liveness banner
pub async fn root(State((backend, _)): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
        "backend": backend.database_type().as_str(),
    }))
}

/// Readiness probe. Always answers 200; backend trouble is reported in the
/// body as `degraded` / `disconnected`.
pub async fn health(State((backend, _)): State<AppState>) -> (StatusCode, Json<Value>) {
    let connected = match backend.health_check().await {
        Ok(()) => true,
        Err(e) => {
            warn!("Health check failed: {}", e);
            false
        }
    };

    let body = json!({
        "success": connected,
        "status": if connected { "ok" } else { "degraded" },
        "database": if connected { "connected" } else { "disconnected" },
        "backend": backend.database_type().as_str(),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    });

    (StatusCode::OK, Json(body))
}
