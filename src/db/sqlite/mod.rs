//! SQLite database module

pub mod models;
mod migrations;
mod webhooks;

use crate::error::Result;
pub use models::{WebhookRecord, WebhookStatus};
use parking_lot::Mutex;
use rusqlite::Connection;
use std::path::Path;

/// SQLite database wrapper
pub struct SqliteDb {
    conn: Mutex<Connection>,
}

impl SqliteDb {
    /// Open (or create) the database file and run migrations
    pub fn new(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)?;

        // Enable WAL mode for better concurrent access
        conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA synchronous=NORMAL;")?;

        Self::with_connection(conn)
    }

    /// In-memory database, used by tests and throwaway sessions
    pub fn open_in_memory() -> Result<Self> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> Result<Self> {
        let db = Self {
            conn: Mutex::new(conn),
        };

        db.run_migrations()?;

        Ok(db)
    }

    /// Run database migrations
    fn run_migrations(&self) -> Result<()> {
        let conn = self.conn.lock();
        migrations::run_migrations(&conn)
    }

    // ========== Webhook Methods ==========

    /// Insert a new active webhook
    pub fn create_webhook(&self, name: &str, url: &str) -> Result<WebhookRecord> {
        let conn = self.conn.lock();
        webhooks::create_webhook(&conn, name, url)
    }

    /// Get all active webhooks
    pub fn get_active_webhooks(&self) -> Result<Vec<WebhookRecord>> {
        let conn = self.conn.lock();
        webhooks::get_active_webhooks(&conn)
    }

    /// Soft-delete a webhook
    pub fn deactivate_webhook(&self, id: i64) -> Result<bool> {
        let conn = self.conn.lock();
        webhooks::deactivate_webhook(&conn, id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_records_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("webhooks.db");

        let id = {
            let db = SqliteDb::new(&path).unwrap();
            let kept = db.create_webhook("kept", "https://kept.example").unwrap();
            let dropped = db.create_webhook("dropped", "https://dropped.example").unwrap();
            db.deactivate_webhook(dropped.id).unwrap();
            kept.id
        };

        let db = SqliteDb::new(&path).unwrap();
        let active = db.get_active_webhooks().unwrap();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].id, id);
        assert_eq!(active[0].url, "https://kept.example");
    }
}
