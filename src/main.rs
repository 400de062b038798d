use clap::Parser;
use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{error, info, warn};

use user_crud_server::config::{AppConfig, Environment};
use user_crud_server::error::{AppError, AppResult};
use user_crud_server::{logging, startup};

#[derive(Parser, Debug)]
#[command(name = "user-crud-server")]
#[command(about = "User CRUD REST API with pluggable storage backends")]
struct Args {
    /// Configuration file path (default: config.yaml)
    #[arg(short, long, default_value = "config.yaml")]
    config: String,

    /// Port to listen on (overrides config file and PORT)
    #[arg(short, long)]
    port: Option<u16>,

    /// Host to bind to (overrides config file and HOST)
    #[arg(long)]
    host: Option<String>,
}

fn load_config(args: &Args) -> AppResult<AppConfig> {
    let mut app_config = if args.config == "config.yaml" && !Path::new("config.yaml").exists() {
        info!("No config.yaml found, using built-in defaults");
        AppConfig::default_config()
    } else {
        AppConfig::load_from_file(&args.config).map_err(AppError::Configuration)?
    };

    app_config
        .apply_env_overrides(|key| std::env::var(key).ok())
        .map_err(AppError::Configuration)?;

    if let Some(port) = args.port {
        app_config.server.port = port;
    }
    if let Some(host) = &args.host {
        app_config.server.host = host.clone();
    }

    app_config.validate()?;
    Ok(app_config)
}

async fn run(args: Args) -> AppResult<()> {
    let app_config = Arc::new(load_config(&args)?);

    info!(
        environment = ?app_config.environment,
        host = %app_config.server.host,
        port = app_config.server.port,
        prefix = %app_config.server.api_prefix,
        "Configuration loaded"
    );

    let backend = startup::initialize_backend(&app_config).await?;
    info!(backend = backend.database_type().as_str(), "Backend ready");

    let host: std::net::IpAddr = app_config.server.host.parse().map_err(|_| {
        AppError::Configuration(format!("Invalid host address: {}", app_config.server.host))
    })?;
    let addr = SocketAddr::from((host, app_config.server.port));

    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::Configuration(format!("Failed to bind {}: {}", addr, e)))?;

    let app = startup::build_router(backend.clone(), app_config.clone());
    info!("User CRUD server listening on {}", addr);

    let served = axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(startup::shutdown_signal())
    .await;

    // The backend is closed exactly once, whether serving ended cleanly or not
    if let Err(e) = backend.close().await {
        warn!("Failed to close backend cleanly: {}", e);
    }

    served.map_err(|e| AppError::Internal(format!("Server error: {}", e)))?;
    info!("Server stopped");
    Ok(())
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    // .env is a development convenience only
    if !Environment::from_env().is_production() {
        dotenv::dotenv().ok();
    }

    logging::init_tracing();

    if let Err(e) = run(args).await {
        error!("Startup failed: {}", e);
        std::process::exit(1);
    }
}
