// API Server Binary Entry Point
//
// Purpose: Load reference data and serve the setup / diagnose endpoints
// Usage: cargo run --features api --bin api_server

use std::net::SocketAddr;

use suspension_tuner::reference::store::{DEFAULT_LOGIC_FILE, DEFAULT_SPECS_FILE};
use suspension_tuner::{create_router, AppState, ReferencePaths};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing (structured logging)
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| {
                    // Default log level: info for our crate, warn for others
                    "suspension_tuner=info,tower_http=debug,axum=debug,warn".into()
                }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting API server...");

    // Configuration from environment variables
    let data_dir = std::env::var("DATA_DIR").unwrap_or_else(|_| "data".to_string());

    let specs_file =
        std::env::var("SPECS_FILE").unwrap_or_else(|_| DEFAULT_SPECS_FILE.to_string());

    let logic_file =
        std::env::var("LOGIC_FILE").unwrap_or_else(|_| DEFAULT_LOGIC_FILE.to_string());

    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8000);

    tracing::info!("Configuration:");
    tracing::info!("  DATA_DIR: {}", data_dir);
    tracing::info!("  SPECS_FILE: {}", specs_file);
    tracing::info!("  LOGIC_FILE: {}", logic_file);
    tracing::info!("  PORT: {}", port);

    // Reference data is loaded once and frozen before the first request
    let paths = ReferencePaths::new(&data_dir, &specs_file, &logic_file);
    let state = AppState::load(&paths);

    let app = create_router(state);

    let addr = SocketAddr::from(([127, 0, 0, 1], port));
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
