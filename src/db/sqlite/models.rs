//! SQLite database models

use serde::{Deserialize, Serialize};

/// Soft-delete status of a webhook, stored as the `active` column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WebhookStatus {
    Active,
    Inactive,
}

impl WebhookStatus {
    pub fn from_flag(active: bool) -> Self {
        if active {
            WebhookStatus::Active
        } else {
            WebhookStatus::Inactive
        }
    }

    pub fn is_active(self) -> bool {
        self == WebhookStatus::Active
    }
}

/// Registered webhook endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebhookRecord {
    pub id: i64,
    pub name: String,
    pub url: String,
    pub status: WebhookStatus,
}

impl WebhookRecord {
    pub fn is_active(&self) -> bool {
        self.status.is_active()
    }
}
