//! # Crown API server
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Admin frontend ───► HTTP (8080) ───► routes ───► crown-store           │
//! │                                                      │                  │
//! │                                                      ▼                  │
//! │                                          SQLite (./data/crown.db)       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::net::SocketAddr;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crown_api::{build_app, ApiConfig, AppState};

const DEFAULT_LOG_FILTER: &str = "crown_api=info,crown_store=info,tower_http=info";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .with_target(true)
        .init();

    info!("Starting Crown API server...");

    let config = ApiConfig::load().context("Failed to load configuration")?;
    info!(
        port = config.http_port,
        storage = ?config.storage,
        database = %config.database_path.display(),
        "Configuration loaded"
    );

    let state = AppState::connect(config.clone())
        .await
        .context("Failed to open storage")?;

    match state.stores.ensure_seed().await {
        Ok(()) => info!("Catalogue seed checked"),
        Err(e) => warn!(error = %e, "Seeding failed, will retry on first request"),
    }

    let app = build_app(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.http_port));
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!(%addr, "Listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

/// Resolves on Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "Failed to listen for Ctrl+C");
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
                warn!(error = %e, "Failed to install SIGTERM handler");
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

    info!("Shutdown signal received, starting graceful shutdown...");
}
