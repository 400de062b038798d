use axum::{
    http::StatusCode,
    middleware,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::json;
use std::any::Any;
use std::sync::Arc;
use tower_http::{catch_panic::CatchPanicLayer, cors::CorsLayer};
use tracing::{error, info};

use crate::backend::{BackendFactory, UserRepository};
use crate::config::AppConfig;
use crate::error::AppResult;
use crate::logging::logging_middleware;
use crate::resource::{health, user};
use crate::utils::{normalize_prefix, panic_message};

/// Connect the configured backend and prepare its schema
pub async fn initialize_backend(config: &AppConfig) -> AppResult<Arc<dyn UserRepository>> {
    let backend_config = config.backend_config()?;

    info!(
        backend = backend_config.database_type.as_str(),
        in_memory = backend_config.is_memory_database(),
        "Setting up storage backend"
    );

    BackendFactory::create(&backend_config).await
}

/// Assemble the application router around an already connected backend
pub fn build_router(backend: Arc<dyn UserRepository>, config: Arc<AppConfig>) -> Router {
    let prefix = normalize_prefix(&config.server.api_prefix);
    let expose_details = config.expose_error_details();

    let users = Router::new()
        .route("/", post(user::create_user).get(user::list_users))
        .route("/email/{email}", get(user::get_user_by_email))
        .route(
            "/{id}",
            get(user::get_user)
                .put(user::replace_user)
                .patch(user::update_user)
                .delete(user::delete_user),
        );

    let router = Router::new()
        .route("/", get(health::root))
        .route("/health", get(health::health))
        .nest(&prefix, users);

    with_middleware(router, expose_details).with_state((backend, config))
}

/// Access log, panic interception and CORS, innermost first
fn with_middleware<S>(router: Router<S>, expose_details: bool) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    router
        .layer(middleware::from_fn(logging_middleware))
        .layer(CatchPanicLayer::custom(move |payload| {
            panic_response(payload, expose_details)
        }))
        // Outermost, so panic responses carry CORS headers too
        .layer(CorsLayer::permissive())
}

fn panic_response(payload: Box<dyn Any + Send + 'static>, expose_details: bool) -> Response {
    let detail = panic_message(payload.as_ref());
    error!("Handler panicked: {}", detail);

    let mut body = json!({
        "success": false,
        "message": "Internal server error",
    });
    if expose_details {
        body["error"] = json!(detail);
    }

    (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
}

/// Resolves on SIGINT or, on Unix, SIGTERM
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
