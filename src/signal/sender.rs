//! Outbound delivery of signal payloads

use crate::error::Result;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Serialize, Serializer};
use std::fmt;
use std::time::Duration;

/// What happened to a single POST
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeliveryDetail {
    /// Endpoint answered with this HTTP status
    Status(u16),
    /// Request did not complete within the timeout
    Timeout,
    /// Any other transport failure
    Error(String),
}

impl fmt::Display for DeliveryDetail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeliveryDetail::Status(code) => write!(f, "{}", code),
            DeliveryDetail::Timeout => f.write_str("Timeout"),
            DeliveryDetail::Error(message) => f.write_str(message),
        }
    }
}

// Status codes go out as numbers, everything else as text.
impl Serialize for DeliveryDetail {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            DeliveryDetail::Status(code) => serializer.serialize_u16(*code),
            other => serializer.serialize_str(&other.to_string()),
        }
    }
}

/// Outcome of one send: success only on HTTP 200
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeliveryOutcome {
    pub success: bool,
    pub detail: DeliveryDetail,
}

impl DeliveryOutcome {
    pub fn from_status(code: u16) -> Self {
        Self {
            success: code == 200,
            detail: DeliveryDetail::Status(code),
        }
    }

    pub fn timeout() -> Self {
        Self {
            success: false,
            detail: DeliveryDetail::Timeout,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            detail: DeliveryDetail::Error(message.into()),
        }
    }
}

/// Transport used by the broadcaster
///
/// Implementations never fail: every problem is folded into the outcome.
#[async_trait]
pub trait WebhookSender: Send + Sync {
    /// POST `payload` as a JSON-encoded string to `url`
    async fn post_payload(&self, url: &str, payload: &str, timeout: Duration) -> DeliveryOutcome;
}

/// reqwest-backed sender
pub struct HttpSender {
    client: Client,
}

impl HttpSender {
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("signal-relay/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { client })
    }
}

#[async_trait]
impl WebhookSender for HttpSender {
    async fn post_payload(&self, url: &str, payload: &str, timeout: Duration) -> DeliveryOutcome {
        let response = self
            .client
            .post(url)
            .timeout(timeout)
            .json(payload)
            .send()
            .await;

        match response {
            Ok(response) => DeliveryOutcome::from_status(response.status().as_u16()),
            Err(e) if e.is_timeout() => DeliveryOutcome::timeout(),
            Err(e) => DeliveryOutcome::error(e.to_string()),
        }
    }
}
