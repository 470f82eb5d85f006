//! Dashboard API handlers

use crate::api::types::*;
use crate::db::sqlite::WebhookRecord;
use crate::error::{AppError, Result};
use crate::signal::{build_payload, Instrument, SignalAction};
use crate::state::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use std::sync::Arc;
use tracing::info;

type SharedState = State<Arc<AppState>>;

/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    Json(ApiResponse::<Empty>::success_with_message("Signal Relay API is running"))
}

/// GET /api/webhooks
pub async fn list_webhooks(
    State(state): SharedState,
) -> Result<Json<ApiResponse<Vec<WebhookRecord>>>> {
    let webhooks = state.registry.list_active()?;
    Ok(Json(ApiResponse::success_with_data(webhooks)))
}

/// POST /api/webhooks
pub async fn add_webhook(
    State(state): SharedState,
    Json(request): Json<AddWebhookRequest>,
) -> Result<impl IntoResponse> {
    let name = request.name.trim();
    let url = request.url.trim();

    if name.is_empty() || url.is_empty() {
        return Err(AppError::Validation("Please fill in all fields".to_string()));
    }

    let webhook = state.registry.add(name, url)?;
    let message = format!("Added webhook: {}", webhook.name);

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success_with_data(webhook).with_message(message)),
    ))
}

/// DELETE /api/webhooks/:id
pub async fn delete_webhook(
    State(state): SharedState,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<Empty>>> {
    state.registry.delete(id)?;
    Ok(Json(ApiResponse::success_with_message("Webhook deleted")))
}

/// GET /api/instruments
pub async fn list_instruments() -> Json<ApiResponse<Vec<Instrument>>> {
    Json(ApiResponse::success_with_data(Instrument::ALL.to_vec()))
}

/// GET /api/payload?instrument=..&action=..
pub async fn preview_payload(
    Query(query): Query<PayloadQuery>,
) -> Result<Json<ApiResponse<PayloadPreview>>> {
    let instrument: Instrument = query.instrument.parse()?;
    let action: SignalAction = query.action.parse()?;

    let payload = build_payload(instrument, action);
    let body = serde_json::to_string(&payload)?;

    Ok(Json(ApiResponse::success_with_data(PayloadPreview {
        instrument,
        action,
        payload,
        body,
    })))
}

/// POST /api/signal
pub async fn send_signal(
    State(state): SharedState,
    Json(request): Json<SignalRequest>,
) -> Result<Json<ApiResponse<SignalResponse>>> {
    let instrument: Instrument = request.instrument.parse()?;
    let action: SignalAction = request.action.parse()?;
    let target = SignalTarget::from_request(request.webhook.as_deref());

    let targets = select_targets(&state, &target)?;

    info!(
        "Sending {} {} to {} webhook(s)",
        action.label(),
        instrument,
        targets.len()
    );

    let report = state
        .broadcaster
        .broadcast(&targets, instrument, action)
        .await;
    let response = SignalResponse::render(report, &target);

    let summary = response.summary.clone();
    let body = if response.any_delivered() {
        ApiResponse::success_with_data(response).with_message(summary)
    } else {
        ApiResponse::error_with_data(&summary, response)
    };

    Ok(Json(body))
}

fn select_targets(state: &AppState, target: &SignalTarget) -> Result<Vec<WebhookRecord>> {
    match target {
        SignalTarget::All => {
            let webhooks = state.registry.list_active()?;
            if webhooks.is_empty() {
                return Err(AppError::Validation(
                    "No webhooks configured. Please add a webhook first.".to_string(),
                ));
            }
            Ok(webhooks)
        }
        SignalTarget::Named(name) => state
            .registry
            .find_active_by_name(name)?
            .map(|webhook| vec![webhook])
            .ok_or_else(|| AppError::NotFound(format!("Webhook not found: {}", name))),
    }
}
