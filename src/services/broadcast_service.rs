//! Signal Broadcaster
//!
//! Posts a rendered signal to one or many registered webhooks. Targets are
//! sent to one after another; a failing target never stops the rest.

use crate::db::sqlite::WebhookRecord;
use crate::error::Result;
use crate::signal::{
    build_payload, DeliveryDetail, DeliveryOutcome, HttpSender, Instrument, SignalAction,
    WebhookSender,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

/// Default per-request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Delivery result for one target
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeliveryResult {
    pub name: String,
    pub url: String,
    pub success: bool,
    pub detail: DeliveryDetail,
}

/// Outcome of a broadcast, one result per target in input order
#[derive(Debug, Clone, Serialize)]
pub struct BroadcastReport {
    pub instrument: Instrument,
    pub action: SignalAction,
    pub sent_at: DateTime<Utc>,
    pub results: Vec<DeliveryResult>,
}

impl BroadcastReport {
    pub fn success_count(&self) -> usize {
        self.results.iter().filter(|r| r.success).count()
    }

    pub fn total(&self) -> usize {
        self.results.len()
    }

    pub fn all_failed(&self) -> bool {
        self.success_count() == 0
    }
}

pub struct SignalBroadcaster {
    sender: Arc<dyn WebhookSender>,
    timeout: Duration,
}

impl SignalBroadcaster {
    pub fn new(sender: Arc<dyn WebhookSender>, timeout: Duration) -> Self {
        Self { sender, timeout }
    }

    /// Broadcaster over real HTTP
    pub fn http(timeout: Duration) -> Result<Self> {
        Ok(Self::new(Arc::new(HttpSender::new()?), timeout))
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn build_payload(&self, instrument: Instrument, action: SignalAction) -> String {
        build_payload(instrument, action)
    }

    /// Send a signal to a single url with the configured timeout
    pub async fn send(
        &self,
        url: &str,
        instrument: Instrument,
        action: SignalAction,
    ) -> DeliveryOutcome {
        self.send_with_timeout(url, instrument, action, self.timeout)
            .await
    }

    pub async fn send_with_timeout(
        &self,
        url: &str,
        instrument: Instrument,
        action: SignalAction,
        timeout: Duration,
    ) -> DeliveryOutcome {
        let payload = build_payload(instrument, action);
        self.sender.post_payload(url, &payload, timeout).await
    }

    /// Send to every target in order and collect the outcomes
    pub async fn broadcast(
        &self,
        targets: &[WebhookRecord],
        instrument: Instrument,
        action: SignalAction,
    ) -> BroadcastReport {
        let sent_at = Utc::now();
        let mut results = Vec::with_capacity(targets.len());

        for target in targets {
            let outcome = self.send(&target.url, instrument, action).await;

            if outcome.success {
                info!("{} {} delivered to {}", action.label(), instrument, target.name);
            } else {
                warn!(
                    "{} {} failed for {}: {}",
                    action.label(),
                    instrument,
                    target.name,
                    outcome.detail
                );
            }

            results.push(DeliveryResult {
                name: target.name.clone(),
                url: target.url.clone(),
                success: outcome.success,
                detail: outcome.detail,
            });
        }

        let report = BroadcastReport {
            instrument,
            action,
            sent_at,
            results,
        };

        info!(
            "{} {} broadcast: {}/{} delivered",
            action.label(),
            instrument,
            report.success_count(),
            report.total()
        );

        report
    }
}
