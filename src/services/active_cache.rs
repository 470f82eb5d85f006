//! Short-lived cache for the active webhook list
//!
//! Every invalidation bumps a generation counter. A reload captures the
//! generation before reading the store and is only stored if no invalidation
//! happened in between, so a list read before a mutation never outlives it.

use crate::db::sqlite::WebhookRecord;
use parking_lot::RwLock;
use std::time::{Duration, Instant};

#[derive(Debug)]
struct CachedList {
    loaded_at: Instant,
    webhooks: Vec<WebhookRecord>,
}

#[derive(Debug, Default)]
struct CacheState {
    generation: u64,
    entry: Option<CachedList>,
}

/// Single-entry TTL cache holding the last active list read from the store
#[derive(Debug)]
pub struct ActiveListCache {
    ttl: Duration,
    state: RwLock<CacheState>,
}

impl ActiveListCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            state: RwLock::new(CacheState::default()),
        }
    }

    /// Cached list, if present and younger than the TTL
    pub fn get(&self) -> Option<Vec<WebhookRecord>> {
        let state = self.state.read();
        state
            .entry
            .as_ref()
            .filter(|cached| cached.loaded_at.elapsed() < self.ttl)
            .map(|cached| cached.webhooks.clone())
    }

    /// Current generation; capture before reading the store
    pub fn generation(&self) -> u64 {
        self.state.read().generation
    }

    /// Store a list read at `generation`. Returns false, storing nothing,
    /// when the cache was invalidated since.
    pub fn put(&self, generation: u64, webhooks: Vec<WebhookRecord>) -> bool {
        let mut state = self.state.write();
        if state.generation != generation {
            return false;
        }

        state.entry = Some(CachedList {
            loaded_at: Instant::now(),
            webhooks,
        });
        true
    }

    pub fn invalidate(&self) {
        let mut state = self.state.write();
        state.generation = state.generation.wrapping_add(1);
        state.entry = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::sqlite::WebhookStatus;

    fn record(id: i64) -> WebhookRecord {
        WebhookRecord {
            id,
            name: format!("hook-{}", id),
            url: format!("https://example.com/{}", id),
            status: WebhookStatus::Active,
        }
    }

    #[test]
    fn test_fresh_entry_is_served() {
        let cache = ActiveListCache::new(Duration::from_secs(60));
        assert!(cache.get().is_none());

        assert!(cache.put(cache.generation(), vec![record(1), record(2)]));
        assert_eq!(cache.get().unwrap().len(), 2);
    }

    #[test]
    fn test_invalidate() {
        let cache = ActiveListCache::new(Duration::from_secs(60));
        cache.put(cache.generation(), vec![record(1)]);
        cache.invalidate();
        assert!(cache.get().is_none());
    }

    #[test]
    fn test_put_after_invalidate_is_discarded() {
        let cache = ActiveListCache::new(Duration::from_secs(60));

        // Reader captured the generation, then a mutation invalidated
        let generation = cache.generation();
        cache.invalidate();

        assert!(!cache.put(generation, vec![record(1)]));
        assert!(cache.get().is_none());

        assert!(cache.put(cache.generation(), vec![record(2)]));
        assert_eq!(cache.get().unwrap()[0].id, 2);
    }

    #[test]
    fn test_zero_ttl_never_serves() {
        let cache = ActiveListCache::new(Duration::ZERO);
        cache.put(cache.generation(), vec![record(1)]);
        assert!(cache.get().is_none());
    }

    #[test]
    fn test_entry_expires() {
        let cache = ActiveListCache::new(Duration::from_millis(50));
        cache.put(cache.generation(), vec![record(1)]);
        assert!(cache.get().is_some());

        std::thread::sleep(Duration::from_millis(80));
        assert!(cache.get().is_none());
    }
}
