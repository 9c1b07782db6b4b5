//! # pfa-api — Binary Entry Point
//!
//! Starts the Axum HTTP server for the Private Fund Architect API.
//! Binds to configurable port (default 8080).

use std::time::Duration;

use pfa_api::state::{AppConfig, AppState};

/// How often expired share links are swept.
const SHARE_SWEEP_INTERVAL: Duration = Duration::from_secs(15 * 60);

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let config = AppConfig::from_env();
    tracing::info!(?config, "configuration loaded");
    let port = config.port;

    // Absent DATABASE_URL means in-memory only.
    let db_pool = pfa_api::db::init_pool().await.map_err(|e| {
        tracing::error!("Database initialization failed: {e}");
        e
    })?;

    let state = AppState::with_config(config, db_pool);

    state.hydrate_from_db().await.map_err(|e| {
        tracing::error!("Database hydration failed: {e}");
        e
    })?;

    let sweeper = state.clone();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(SHARE_SWEEP_INTERVAL);
        loop {
            interval.tick().await;
            sweeper.purge_expired_shares(chrono::Utc::now()).await;
        }
    });

    let app = pfa_api::app(state);

    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("PFA API listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("PFA API stopped");
    Ok(())
}

/// Structured logging; `LOG_FORMAT=json` switches to JSON lines.
fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let json = std::env::var("LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    if json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}
