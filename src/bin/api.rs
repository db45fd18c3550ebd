//! Touch Grass API Server
//!
//! Run with: cargo run --bin touchgrass-api
//!
//! # Configuration
//!
//! Read from `~/.config/touchgrass/config.toml`, `/etc/touchgrass/config.toml`
//! or `./config.toml`, whichever exists first. Environment variables override
//! the file:
//! - `TOUCHGRASS_API_HOST`: Host to bind to (default: 0.0.0.0)
//! - `TOUCHGRASS_API_PORT`: Port to listen on (default: 8090)
//! - `TOUCHGRASS_DATA_DIR`: Where the stake ledger is kept
//! - `TOUCHGRASS_SEED`: Seed for the generated dataset (default: 42)
//! - `TOUCHGRASS_LATENCY_MS`: Simulated wallet latency (default: 1000)
//! - `TOUCHGRASS_LOG_LEVEL`, `TOUCHGRASS_LOG_FORMAT`: Logging (or `RUST_LOG`)

use anyhow::Context;
use touchgrass::api::{serve, AppState};
use touchgrass::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load_default();
    config.logging.init("tower_http=debug");

    tracing::info!("Starting Touch Grass API server v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Data directory: {}", config.storage.data_dir);
    tracing::info!(
        "Dataset seed {}, wallet latency {}ms",
        config.simulation.seed,
        config.simulation.wallet_latency_ms
    );

    if config.storage.persist_stakes {
        if let Err(e) = std::fs::create_dir_all(&config.storage.data_dir) {
            tracing::warn!("Could not create data directory: {}", e);
        }
    }

    let api_config = config.api.clone();
    let state = AppState::new(config).context("Failed to open the stake ledger")?;

    let open = state.wallet.open_stakes().await;
    if !open.is_empty() {
        tracing::info!("{} stake(s) restored from the ledger", open.len());
    }

    tracing::info!("UI expected at {}", api_config.cors_origins.join(", "));
    serve(state, &api_config)
        .await
        .with_context(|| format!("API server on {} failed", api_config.addr()))?;

    Ok(())
}
