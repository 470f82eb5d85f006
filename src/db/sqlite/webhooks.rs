//! Webhook endpoint storage
//!
//! Rows are never removed. Deleting a webhook clears its `active` flag.

use crate::db::sqlite::models::{WebhookRecord, WebhookStatus};
use crate::error::{AppError, Result};
use rusqlite::{Connection, OptionalExtension, Row};

// Columns are nullable in databases created by earlier dashboard builds
fn map_webhook(row: &Row<'_>) -> rusqlite::Result<WebhookRecord> {
    Ok(WebhookRecord {
        id: row.get(0)?,
        name: row.get::<_, Option<String>>(1)?.unwrap_or_default(),
        url: row.get::<_, Option<String>>(2)?.unwrap_or_default(),
        status: WebhookStatus::from_flag(row.get::<_, Option<bool>>(3)?.unwrap_or(false)),
    })
}

/// Insert a new active webhook
pub fn create_webhook(conn: &Connection, name: &str, url: &str) -> Result<WebhookRecord> {
    conn.execute(
        "INSERT INTO webhooks (name, url, active) VALUES (?, ?, ?)",
        rusqlite::params![name, url, true],
    )?;

    let id = conn.last_insert_rowid();

    get_webhook_by_id(conn, id)?
        .ok_or_else(|| AppError::Internal(format!("Webhook {} missing after insert", id)))
}

/// Get all active webhooks in insertion order
pub fn get_active_webhooks(conn: &Connection) -> Result<Vec<WebhookRecord>> {
    let mut stmt = conn.prepare(
        "SELECT id, name, url, active FROM webhooks WHERE active = 1 ORDER BY id ASC",
    )?;

    let webhooks = stmt
        .query_map([], map_webhook)?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    Ok(webhooks)
}

/// Get a webhook by ID regardless of status
pub fn get_webhook_by_id(conn: &Connection, id: i64) -> Result<Option<WebhookRecord>> {
    let webhook = conn
        .query_row(
            "SELECT id, name, url, active FROM webhooks WHERE id = ?",
            [id],
            map_webhook,
        )
        .optional()?;

    Ok(webhook)
}

/// Mark a webhook inactive. Returns false when no row has this ID.
pub fn deactivate_webhook(conn: &Connection, id: i64) -> Result<bool> {
    let rows = conn.execute("UPDATE webhooks SET active = 0 WHERE id = ?", [id])?;
    Ok(rows > 0)
}
