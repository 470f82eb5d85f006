//! Dashboard API types

use crate::services::{BroadcastReport, DeliveryResult};
use crate::signal::{Instrument, SignalAction};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Target label the dashboard uses for "every active webhook"
pub const ALL_WEBHOOKS: &str = "All Webhooks";

/// Standard API response format
#[derive(Debug, Clone, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn success_with_message(message: &str) -> Self {
        Self {
            status: "success".to_string(),
            message: Some(message.to_string()),
            data: None,
        }
    }

    pub fn success_with_data(data: T) -> Self {
        Self {
            status: "success".to_string(),
            message: None,
            data: Some(data),
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn error_with_data(message: &str, data: T) -> Self {
        Self {
            status: "error".to_string(),
            message: Some(message.to_string()),
            data: Some(data),
        }
    }
}

/// Empty data marker
#[derive(Debug, Clone, Serialize)]
pub struct Empty {}

#[derive(Debug, Deserialize)]
pub struct AddWebhookRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub url: String,
}

#[derive(Debug, Deserialize)]
pub struct PayloadQuery {
    pub instrument: String,
    pub action: String,
}

#[derive(Debug, Serialize)]
pub struct PayloadPreview {
    pub instrument: Instrument,
    pub action: SignalAction,
    /// Raw signal text
    pub payload: String,
    /// Exact request body sent to endpoints
    pub body: String,
}

#[derive(Debug, Deserialize)]
pub struct SignalRequest {
    pub instrument: String,
    pub action: String,
    /// Webhook name, or absent / "All Webhooks" for every active webhook
    #[serde(default)]
    pub webhook: Option<String>,
}

/// Which webhooks a signal goes to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignalTarget {
    All,
    Named(String),
}

impl SignalTarget {
    /// Only the dashboard sentinel or a missing name means broadcast, so a
    /// webhook may be called anything else, "All" included.
    pub fn from_request(webhook: Option<&str>) -> Self {
        match webhook.map(str::trim) {
            None | Some("") | Some(ALL_WEBHOOKS) => SignalTarget::All,
            Some(name) => SignalTarget::Named(name.to_string()),
        }
    }
}

/// Broadcast report plus its dashboard rendering
#[derive(Debug, Serialize)]
pub struct SignalResponse {
    pub instrument: Instrument,
    pub action: SignalAction,
    pub target: String,
    pub sent_at: DateTime<Utc>,
    pub success_count: usize,
    pub total: usize,
    pub results: Vec<DeliveryResult>,
    pub summary: String,
    pub details: Vec<String>,
}

impl SignalResponse {
    pub fn render(report: BroadcastReport, target: &SignalTarget) -> Self {
        let summary = summary_line(&report, target);
        let details = report.results.iter().map(detail_line).collect();
        let target = match target {
            SignalTarget::All => ALL_WEBHOOKS.to_string(),
            SignalTarget::Named(name) => name.clone(),
        };

        Self {
            instrument: report.instrument,
            action: report.action,
            target,
            sent_at: report.sent_at,
            success_count: report.success_count(),
            total: report.total(),
            summary,
            details,
            results: report.results,
        }
    }

    pub fn any_delivered(&self) -> bool {
        self.success_count > 0
    }
}

/// Banner shown above the detail list
pub fn summary_line(report: &BroadcastReport, target: &SignalTarget) -> String {
    let label = report.action.label();

    match target {
        SignalTarget::All if report.all_failed() => {
            format!("Failed to send {} signal to all {} webhooks", label, report.total())
        }
        SignalTarget::All => format!(
            "{} signal sent to {}/{} webhooks successfully!",
            label,
            report.success_count(),
            report.total()
        ),
        SignalTarget::Named(_) => match report.results.first() {
            Some(result) if result.success => format!("{} signal sent successfully!", label),
            Some(result) => format!("Failed to send {} signal: {}", label, result.detail),
            None => format!("Failed to send {} signal: no target", label),
        },
    }
}

/// One line per endpoint in the details panel
pub fn detail_line(result: &DeliveryResult) -> String {
    if result.success {
        format!("• {}: ✅ Success", result.name)
    } else {
        format!("• {}: ❌ Failed ({})", result.name, result.detail)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signal::DeliveryDetail;

    fn result(name: &str, detail: DeliveryDetail) -> DeliveryResult {
        DeliveryResult {
            name: name.to_string(),
            url: format!("https://{}.example", name),
            success: detail == DeliveryDetail::Status(200),
            detail,
        }
    }

    fn report(results: Vec<DeliveryResult>) -> BroadcastReport {
        BroadcastReport {
            instrument: Instrument::Us100,
            action: SignalAction::Buy,
            sent_at: Utc::now(),
            results,
        }
    }

    #[test]
    fn test_target_parsing() {
        assert_eq!(SignalTarget::from_request(None), SignalTarget::All);
        assert_eq!(SignalTarget::from_request(Some("All Webhooks")), SignalTarget::All);
        assert_eq!(SignalTarget::from_request(Some("")), SignalTarget::All);
        assert_eq!(
            SignalTarget::from_request(Some("All")),
            SignalTarget::Named("All".to_string())
        );
        assert_eq!(
            SignalTarget::from_request(Some(" Desk ")),
            SignalTarget::Named("Desk".to_string())
        );
    }

    #[test]
    fn test_broadcast_summary() {
        let partial = report(vec![
            result("a", DeliveryDetail::Status(200)),
            result("b", DeliveryDetail::Timeout),
        ]);
        assert_eq!(
            summary_line(&partial, &SignalTarget::All),
            "BUY signal sent to 1/2 webhooks successfully!"
        );

        let failed = report(vec![result("a", DeliveryDetail::Status(500))]);
        assert_eq!(
            summary_line(&failed, &SignalTarget::All),
            "Failed to send BUY signal to all 1 webhooks"
        );
    }

    #[test]
    fn test_single_target_summary() {
        let target = SignalTarget::Named("a".to_string());

        let ok = report(vec![result("a", DeliveryDetail::Status(200))]);
        assert_eq!(summary_line(&ok, &target), "BUY signal sent successfully!");

        let timed_out = report(vec![result("a", DeliveryDetail::Timeout)]);
        assert_eq!(
            summary_line(&timed_out, &target),
            "Failed to send BUY signal: Timeout"
        );
    }

    #[test]
    fn test_detail_lines() {
        assert_eq!(
            detail_line(&result("a", DeliveryDetail::Status(200))),
            "• a: ✅ Success"
        );
        assert_eq!(
            detail_line(&result("b", DeliveryDetail::Status(404))),
            "• b: ❌ Failed (404)"
        );
    }
}
