//! Fake listings backend for integration tests.
//!
//! Spins up a minimal `axum` HTTP server on a random TCP port bound to
//! 127.0.0.1. Serves `GET /api/flats/flat-list`:
//! - `403 Forbidden` when a token is required and the request's
//!   `Authorization: Bearer …` header does not carry it;
//! - a forced status when one is set with [`FakeBackend::fail_with`];
//! - the configured payload otherwise.
//!
//! # Example
//!
//! ```rust,ignore
//! let backend = FakeBackend::start(sample_envelope()).await.unwrap();
//! backend.require_token("s3cret").await;
//! let source = HttpSource::new(&backend.base_url(), Some("s3cret".into())).unwrap();
//! ```

use axum::{
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::Value;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::Mutex;

/// State shared between the router and test code.
#[derive(Default)]
struct BackendState {
    payload: Value,
    token: Option<String>,
    forced_status: Option<StatusCode>,
    /// `Authorization` header of every request received, in order.
    seen_auth: Vec<Option<String>>,
}

/// Handle to the running fake backend.
pub struct FakeBackend {
    addr: SocketAddr,
    state: Arc<Mutex<BackendState>>,
}

impl FakeBackend {
    /// Start the server on a random port, serving `payload`. Returns once
    /// the server is listening.
    pub async fn start(payload: Value) -> std::io::Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let state = Arc::new(Mutex::new(BackendState {
            payload,
            ..Default::default()
        }));

        let app = Router::new()
            .route("/api/flats/flat-list", get(flat_list))
            .with_state(state.clone());

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Ok(Self { addr, state })
    }

    /// Base URL to hand to the HTTP source (e.g. `http://127.0.0.1:PORT/api`).
    pub fn base_url(&self) -> String {
        format!("http://{}/api", self.addr)
    }

    /// Reject requests that do not present `token`.
    pub async fn require_token(&self, token: &str) {
        self.state.lock().await.token = Some(token.to_string());
    }

    /// Answer every request with `status` and an empty body.
    pub async fn fail_with(&self, status: StatusCode) {
        self.state.lock().await.forced_status = Some(status);
    }

    /// Replace the served payload.
    pub async fn set_payload(&self, payload: Value) {
        self.state.lock().await.payload = payload;
    }

    /// `Authorization` headers received so far.
    pub async fn seen_auth(&self) -> Vec<Option<String>> {
        self.state.lock().await.seen_auth.clone()
    }
}

// ---------------------------------------------------------------------------
// Route handlers
// ---------------------------------------------------------------------------

async fn flat_list(
    State(state): State<Arc<Mutex<BackendState>>>,
    headers: HeaderMap,
) -> Response {
    let mut state = state.lock().await;
    let auth = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    state.seen_auth.push(auth.clone());

    if let Some(status) = state.forced_status {
        return status.into_response();
    }
    if let Some(token) = &state.token {
        if auth.as_deref() != Some(format!("Bearer {token}").as_str()) {
            return StatusCode::FORBIDDEN.into_response();
        }
    }
    Json(state.payload.clone()).into_response()
}
