//! HTTP server for the dashboard API
//!
//! Provides:
//! - Webhook registry management (/api/webhooks)
//! - Signal dispatch (/api/signal)
//! - Payload preview and instrument list for the dashboard

use crate::api::handlers;
use crate::error::{AppError, Result};
use crate::state::AppState;
use axum::{
    routing::{delete, get, post},
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, info};

/// Build the router with all routes
pub fn router(state: Arc<AppState>) -> Router {
    // Build CORS layer (allow all for local development)
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        .route("/", get(handlers::health_check))
        // Webhook registry
        .route(
            "/api/webhooks",
            get(handlers::list_webhooks).post(handlers::add_webhook),
        )
        .route("/api/webhooks/:id", delete(handlers::delete_webhook))
        // Signals
        .route("/api/instruments", get(handlers::list_instruments))
        .route("/api/payload", get(handlers::preview_payload))
        .route("/api/signal", post(handlers::send_signal))
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

/// Dashboard API server manager
pub struct ApiServer {
    state: Arc<AppState>,
    shutdown_tx: Option<oneshot::Sender<()>>,
    task: Option<JoinHandle<()>>,
}

impl ApiServer {
    /// Create a new server
    pub fn new(state: Arc<AppState>) -> Self {
        Self {
            state,
            shutdown_tx: None,
            task: None,
        }
    }

    /// Bind and start serving in the background. Returns the bound address.
    pub async fn start(&mut self, addr: SocketAddr) -> Result<SocketAddr> {
        if self.shutdown_tx.is_some() {
            return Err(AppError::Internal("API server already running".to_string()));
        }

        let app = router(self.state.clone());

        let listener = tokio::net::TcpListener::bind(addr).await.map_err(|e| {
            AppError::Config(format!("Failed to bind to {}: {}", addr, e))
        })?;
        let local_addr = listener.local_addr()?;

        // Create shutdown channel
        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
        self.shutdown_tx = Some(shutdown_tx);

        // Spawn server task
        let task = tokio::spawn(async move {
            let server = axum::serve(listener, app).with_graceful_shutdown(async {
                let _ = shutdown_rx.await;
                info!("API server shutting down");
            });

            if let Err(e) = server.await {
                error!("API server error: {}", e);
            }
        });
        self.task = Some(task);

        info!("Signal Relay API server started on http://{}", local_addr);
        info!("  GET    /api/webhooks");
        info!("  POST   /api/webhooks");
        info!("  DELETE /api/webhooks/:id");
        info!("  GET    /api/instruments");
        info!("  GET    /api/payload?instrument=&action=");
        info!("  POST   /api/signal");

        Ok(local_addr)
    }

    /// Stop the server
    pub fn stop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
            info!("API server stop requested");
        }
    }

    /// Stop the server and wait for in-flight requests to finish
    pub async fn shutdown(&mut self) {
        self.stop();
        if let Some(task) = self.task.take() {
            if let Err(e) = task.await {
                error!("API server task failed: {}", e);
            }
        }
    }

    pub fn is_running(&self) -> bool {
        self.shutdown_tx.is_some()
    }
}

impl Drop for ApiServer {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::sqlite::SqliteDb;
    use crate::services::SignalBroadcaster;
    use crate::signal::{build_payload, Instrument, SignalAction};
    use crate::test_support::spawn_endpoint;
    use serde_json::{json, Value};
    use std::time::Duration;

    async fn start_api() -> (ApiServer, String) {
        let sqlite = Arc::new(SqliteDb::open_in_memory().unwrap());
        let broadcaster = SignalBroadcaster::http(Duration::from_millis(300)).unwrap();
        let state = Arc::new(AppState::from_parts(
            sqlite,
            broadcaster,
            Duration::from_secs(60),
        ));

        let mut server = ApiServer::new(state);
        let addr = server
            .start("127.0.0.1:0".parse().unwrap())
            .await
            .unwrap();
        (server, format!("http://{}", addr))
    }

    async fn add(client: &reqwest::Client, base: &str, name: &str, url: &str) -> Value {
        let response = client
            .post(format!("{}/api/webhooks", base))
            .json(&json!({ "name": name, "url": url }))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), reqwest::StatusCode::CREATED);
        response.json().await.unwrap()
    }

    #[tokio::test]
    async fn test_webhook_lifecycle() {
        let (_server, base) = start_api().await;
        let client = reqwest::Client::new();

        let created = add(&client, &base, "Desk A", "https://a.example").await;
        assert_eq!(created["data"]["status"], "active");
        assert_eq!(created["message"], "Added webhook: Desk A");
        let id = created["data"]["id"].as_i64().unwrap();

        let listed: Value = client
            .get(format!("{}/api/webhooks", base))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(listed["data"].as_array().unwrap().len(), 1);

        let deleted = client
            .delete(format!("{}/api/webhooks/{}", base, id))
            .send()
            .await
            .unwrap();
        assert_eq!(deleted.status(), reqwest::StatusCode::OK);

        let missing = client
            .delete(format!("{}/api/webhooks/{}", base, 4242))
            .send()
            .await
            .unwrap();
        assert_eq!(missing.status(), reqwest::StatusCode::OK);

        let listed: Value = client
            .get(format!("{}/api/webhooks", base))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert!(listed["data"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_empty_fields_rejected() {
        let (_server, base) = start_api().await;
        let client = reqwest::Client::new();

        let response = client
            .post(format!("{}/api/webhooks", base))
            .json(&json!({ "name": "  ", "url": "https://a.example" }))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), reqwest::StatusCode::BAD_REQUEST);

        let body: Value = response.json().await.unwrap();
        assert_eq!(body["status"], "error");
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_signal_to_all_webhooks() {
        let (_server, base) = start_api().await;
        let endpoint = spawn_endpoint().await;
        let client = reqwest::Client::new();

        add(&client, &base, "ok", &endpoint.url("/ok")).await;
        add(&client, &base, "slow", &endpoint.url("/slow")).await;
        add(&client, &base, "broken", &endpoint.url("/error")).await;

        let body: Value = client
            .post(format!("{}/api/signal", base))
            .json(&json!({ "instrument": "US30", "action": "exit" }))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();

        assert_eq!(body["status"], "success");
        assert_eq!(body["message"], "EXIT signal sent to 1/3 webhooks successfully!");
        assert_eq!(body["data"]["total"], 3);
        assert_eq!(body["data"]["results"][0]["detail"], 200);
        assert_eq!(body["data"]["results"][1]["detail"], "Timeout");
        assert_eq!(body["data"]["results"][2]["detail"], 500);
        assert_eq!(body["data"]["details"][2], "• broken: ❌ Failed (500)");

        let ok_bodies: Vec<_> = endpoint
            .received()
            .into_iter()
            .filter(|r| r.path == "/ok")
            .collect();
        assert_eq!(ok_bodies.len(), 1);
        let decoded: String = serde_json::from_str(&ok_bodies[0].body).unwrap();
        assert_eq!(decoded, build_payload(Instrument::Us30, SignalAction::Exit));
    }

    #[tokio::test]
    async fn test_signal_to_named_webhook() {
        let (_server, base) = start_api().await;
        let endpoint = spawn_endpoint().await;
        let client = reqwest::Client::new();

        add(&client, &base, "primary", &endpoint.url("/ok")).await;
        add(&client, &base, "secondary", &endpoint.url("/error")).await;

        let body: Value = client
            .post(format!("{}/api/signal", base))
            .json(&json!({ "instrument": "gold", "action": "buy", "webhook": "secondary" }))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();

        assert_eq!(body["status"], "error");
        assert_eq!(body["message"], "Failed to send BUY signal: 500");
        assert_eq!(body["data"]["total"], 1);
        assert_eq!(body["data"]["target"], "secondary");

        let unknown = client
            .post(format!("{}/api/signal", base))
            .json(&json!({ "instrument": "GOLD", "action": "buy", "webhook": "nobody" }))
            .send()
            .await
            .unwrap();
        assert_eq!(unknown.status(), reqwest::StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_signal_without_webhooks() {
        let (_server, base) = start_api().await;
        let client = reqwest::Client::new();

        let response = client
            .post(format!("{}/api/signal", base))
            .json(&json!({ "instrument": "DE40", "action": "sell" }))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), reqwest::StatusCode::BAD_REQUEST);

        let bad_action = client
            .post(format!("{}/api/signal", base))
            .json(&json!({ "instrument": "DE40", "action": "hold" }))
            .send()
            .await
            .unwrap();
        assert_eq!(bad_action.status(), reqwest::StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_payload_preview() {
        let (_server, base) = start_api().await;

        let body: Value = reqwest::get(format!("{}/api/payload?instrument=US500&action=sell", base))
            .await
            .unwrap()
            .json()
            .await
            .unwrap();

        let expected = build_payload(Instrument::Us500, SignalAction::Sell);
        assert_eq!(body["data"]["payload"], expected.as_str());
        assert_eq!(
            body["data"]["body"],
            serde_json::to_string(&expected).unwrap().as_str()
        );

        let instruments: Value = reqwest::get(format!("{}/api/instruments", base))
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(
            instruments["data"],
            json!(["GOLD", "US100", "US30", "US500", "DE40"])
        );
    }

    #[tokio::test]
    async fn test_stop() {
        let (mut server, base) = start_api().await;
        assert!(server.is_running());

        let health = reqwest::get(format!("{}/health", base)).await.unwrap();
        assert!(health.status().is_success());
        let body = health.text().await.unwrap();
        assert!(body.contains("Signal Relay API is running"));

        server.shutdown().await;
        assert!(!server.is_running());
        assert!(reqwest::get(format!("{}/health", base)).await.is_err());
    }
}
