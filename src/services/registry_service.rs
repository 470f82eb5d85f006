//! Webhook Registry
//!
//! Add, soft-delete and list the webhook endpoints signals are sent to.
//! Reads of the active list go through [`ActiveListCache`]; every mutation
//! invalidates it before returning.

use crate::db::sqlite::{SqliteDb, WebhookRecord};
use crate::error::Result;
use crate::services::active_cache::ActiveListCache;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

pub struct WebhookRegistry {
    db: Arc<SqliteDb>,
    cache: ActiveListCache,
}

impl WebhookRegistry {
    pub fn new(db: Arc<SqliteDb>, cache_ttl: Duration) -> Self {
        Self {
            db,
            cache: ActiveListCache::new(cache_ttl),
        }
    }

    /// Register a new active webhook.
    ///
    /// Name and url are stored as given; callers reject empty values.
    pub fn add(&self, name: &str, url: &str) -> Result<WebhookRecord> {
        let webhook = self.db.create_webhook(name, url)?;
        self.cache.invalidate();

        info!("Added webhook {} ({})", webhook.name, webhook.id);
        Ok(webhook)
    }

    /// Active webhooks in insertion order
    pub fn list_active(&self) -> Result<Vec<WebhookRecord>> {
        if let Some(webhooks) = self.cache.get() {
            return Ok(webhooks);
        }

        // Captured before the read; a mutation landing meanwhile discards the put
        let generation = self.cache.generation();
        let webhooks = self.db.get_active_webhooks()?;
        self.cache.put(generation, webhooks.clone());
        Ok(webhooks)
    }

    /// Deactivate a webhook. Unknown IDs are ignored.
    pub fn delete(&self, id: i64) -> Result<()> {
        let found = self.db.deactivate_webhook(id)?;
        self.cache.invalidate();

        if found {
            info!("Deactivated webhook {}", id);
        } else {
            debug!("Delete ignored, no webhook with id {}", id);
        }
        Ok(())
    }

    /// First active webhook with this exact name
    pub fn find_active_by_name(&self, name: &str) -> Result<Option<WebhookRecord>> {
        Ok(self.list_active()?.into_iter().find(|w| w.name == name))
    }

    /// Drop the cached active list
    pub fn invalidate(&self) {
        self.cache.invalidate();
    }
}
