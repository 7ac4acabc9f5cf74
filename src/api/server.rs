use std::net::SocketAddr;
use std::sync::Arc;

use axum::{Router, routing::get};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;

use super::{
    services::{get_job, health, scrape},
    state::AppState,
};
use crate::config::Config;
use crate::extract::ListingExtractor;
use crate::fetch::ScrapingBeeClient;
use crate::ledger::JobLedger;

type AnyError = Box<dyn std::error::Error + Send + Sync + 'static>;

pub async fn run(address: Option<SocketAddr>) -> Result<(), AnyError> {
    info!("Loading configuration");
    let config = Config::load().map_err(|e| format!("Failed to load config: {}", e))?;

    let address = address.unwrap_or(config.server.bind_addr);

    // Shared, lifecycle-managed resources: the ledger keyspace and the
    // provider HTTP client are created once here and injected everywhere.
    info!(path = %config.server.ledger_path.display(), "Opening job ledger");
    let ledger = JobLedger::open(&config.server.ledger_path)
        .map_err(|e| format!("Failed to open job ledger: {}", e))?;

    let fetcher = ScrapingBeeClient::new(config.fetch.clone())
        .map_err(|e| format!("Failed to build fetch client: {}", e))?;

    let state = AppState::new(
        config,
        Arc::new(fetcher),
        Arc::new(ListingExtractor::new()),
        Arc::new(ledger),
    );

    let app = router(state);

    let listener = TcpListener::bind(address).await?;
    info!(%address, "Shelfscan server listening");

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Build the application router; shared with the integration tests.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/scrape", get(scrape))
        .route("/jobs/{job_id}", get(get_job))
        .route("/health", get(health))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};
        let mut sigterm =
            signal(SignalKind::terminate()).expect("failed to install signal handler");
        sigterm.recv().await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
