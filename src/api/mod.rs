//! Dashboard API module
//!
//! JSON endpoints behind the dashboard:
//! - Add, list and delete webhooks (/api/webhooks)
//! - Send BUY/SELL/EXIT to one webhook or all of them (/api/signal)
//! - Preview the exact payload (/api/payload)
//!
//! Usage:
//! 1. `POST /api/webhooks` with `{"name": "...", "url": "..."}`
//! 2. `POST /api/signal` with `{"instrument": "US30", "action": "buy"}`
//!    and optionally `"webhook": "<name>"` to target a single webhook

pub mod handlers;
mod server;
mod types;

pub use server::{router, ApiServer};
pub use types::{
    detail_line, summary_line, AddWebhookRequest, ApiResponse, Empty, PayloadPreview,
    PayloadQuery, SignalRequest, SignalResponse, SignalTarget, ALL_WEBHOOKS,
};
