//! Application state management

use crate::config::Config;
use crate::db::sqlite::SqliteDb;
use crate::error::Result;
use crate::services::{SignalBroadcaster, WebhookRegistry};
use std::sync::Arc;
use std::time::Duration;

/// Application state shared across all handlers
pub struct AppState {
    /// Webhook registry over the database
    pub registry: WebhookRegistry,

    /// Outbound signal delivery
    pub broadcaster: SignalBroadcaster,
}

impl AppState {
    /// Create application state from config
    pub fn new(config: &Config) -> Result<Self> {
        let db_path = &config.database.path;

        // Create data directory if it doesn't exist
        if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        tracing::info!("Database: {:?}", db_path);

        let sqlite = Arc::new(SqliteDb::new(db_path)?);
        let broadcaster = SignalBroadcaster::http(config.delivery_timeout())?;

        Ok(Self::from_parts(sqlite, broadcaster, config.cache_ttl()))
    }

    /// Assemble state from already-built parts
    pub fn from_parts(
        sqlite: Arc<SqliteDb>,
        broadcaster: SignalBroadcaster,
        cache_ttl: Duration,
    ) -> Self {
        Self {
            registry: WebhookRegistry::new(sqlite, cache_ttl),
            broadcaster,
        }
    }
}
