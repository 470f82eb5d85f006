//! Services Layer
//!
//! Business logic called by the dashboard API handlers.
//!
//! # Architecture
//!
//! ```text
//! Dashboard API --> Services --> SQLite / outbound HTTP
//! ```
//!
//! # Services
//!
//! - `WebhookRegistry` - Add, soft-delete and list webhook endpoints
//! - `SignalBroadcaster` - Render signals and post them to endpoints

mod active_cache;
pub mod broadcast_service;
pub mod registry_service;

pub use active_cache::ActiveListCache;
pub use broadcast_service::{BroadcastReport, DeliveryResult, SignalBroadcaster, DEFAULT_TIMEOUT};
pub use registry_service::WebhookRegistry;
