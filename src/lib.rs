//! Signal Relay - Trading Webhook Proxy
//!
//! Keeps a registry of webhook endpoints in SQLite and forwards fixed-format
//! BUY/SELL/EXIT signals to one or all of them.

pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod services;
pub mod signal;
pub mod state;

#[cfg(test)]
mod test_support;

use api::ApiServer;
use config::Config;
use state::AppState;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize tracing/logging. `RUST_LOG` overrides the configured level.
pub fn init_logging(level: &str) {
    let _ = tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("signal_relay={},tower_http=info", level).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .try_init();
}

/// Load config, start the dashboard API and serve until Ctrl-C
pub async fn run() -> anyhow::Result<()> {
    let config = Config::load_default()?;
    init_logging(&config.logging.level);

    tracing::info!("Starting Signal Relay...");

    let addr = config.server_addr().await?;
    let app_state = Arc::new(AppState::new(&config)?);
    tracing::info!("Application state initialized");

    let mut server = ApiServer::new(app_state);
    server.start(addr).await?;

    tokio::signal::ctrl_c().await?;
    tracing::info!("Shutdown signal received");

    server.shutdown().await;
    tracing::info!("Signal Relay stopped");
    Ok(())
}
