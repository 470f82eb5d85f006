//! Local HTTP endpoints standing in for remote webhook receivers

use axum::extract::State;
use axum::http::{header, HeaderMap, StatusCode, Uri};
use axum::routing::post;
use axum::Router;
use parking_lot::Mutex;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

/// A request captured by a test endpoint
#[derive(Debug, Clone)]
pub struct Received {
    pub path: String,
    pub content_type: Option<String>,
    pub body: String,
}

/// Receiver with fixed behavior per path:
/// `/ok` 200, `/created` 201, `/error` 500, `/slow` 200 after two seconds.
pub struct TestEndpoint {
    addr: SocketAddr,
    received: Arc<Mutex<Vec<Received>>>,
}

impl TestEndpoint {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    pub fn received(&self) -> Vec<Received> {
        self.received.lock().clone()
    }
}

async fn record(
    State(received): State<Arc<Mutex<Vec<Received>>>>,
    uri: Uri,
    headers: HeaderMap,
    body: String,
) -> StatusCode {
    let path = uri.path().to_string();

    if path == "/slow" {
        tokio::time::sleep(Duration::from_secs(2)).await;
    }

    received.lock().push(Received {
        path: path.clone(),
        content_type: headers
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
        body,
    });

    match path.as_str() {
        "/created" => StatusCode::CREATED,
        "/error" => StatusCode::INTERNAL_SERVER_ERROR,
        _ => StatusCode::OK,
    }
}

pub async fn spawn_endpoint() -> TestEndpoint {
    let received = Arc::new(Mutex::new(Vec::new()));

    let app = Router::new()
        .route("/ok", post(record))
        .route("/created", post(record))
        .route("/error", post(record))
        .route("/slow", post(record))
        .with_state(received.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    TestEndpoint { addr, received }
}

/// URL on a port that was just released, so connections are refused
pub async fn unused_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}/hook", addr)
}
