//! laneroster service daemon.
//!
//! Hosts the occupancy grid behind a small REST API. State lives in
//! memory; a JSON snapshot file is loaded at startup and rewritten after
//! every successful mutation.

use anyhow::{Context, Result};
use roster_service::{
    api, config::Config, persist::JsonFile, service::AllocationService, state::AppState,
    store::OccupancyStore,
};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize tracing (prefer RUST_LOG, fallback to ROSTER_LOG_LEVEL)
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| config.log_level.clone().into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting laneroster service");
    info!(
        listen_addr = %config.listen_addr,
        data_path = %config.data_path.display(),
        "Configuration loaded"
    );

    // Load the persisted grid; a missing snapshot file is a fresh install.
    let snapshot_file = JsonFile::new(&config.data_path);
    let assignments = snapshot_file
        .load()
        .context("failed to load occupancy snapshot")?;
    info!(count = assignments.len(), "Occupancy snapshot loaded");

    let store = OccupancyStore::from_assignments(assignments);
    let service = AllocationService::with_snapshots(store, Box::new(snapshot_file.clone()));
    let state = AppState::new(service, snapshot_file);

    // Build and run the server
    let app = api::create_router(state);

    let listener = tokio::net::TcpListener::bind(&config.listen_addr).await?;
    info!(addr = %config.listen_addr, "Listening for connections");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("Received shutdown signal");
        })
        .await?;

    info!("Service shutdown complete");
    Ok(())
}
