//! In-process stub exchange.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex, MutexGuard};

use axum::extract::State;
use axum::http::{header, HeaderMap, Method, StatusCode, Uri};
use axum::response::IntoResponse;
use axum::Router;
use serde_json::Value;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tracing::debug;

/// Canned response for a path.
#[derive(Debug, Clone)]
pub struct StubResponse {
    /// HTTP status code
    pub status: u16,
    /// Raw body
    pub body: String,
}

/// Request as received by the stub.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    /// HTTP method
    pub method: String,
    /// Path without query string
    pub path: String,
    /// Raw query string
    pub query: Option<String>,
    /// Headers, names lower-cased
    pub headers: HashMap<String, String>,
    /// Raw body
    pub body: String,
}

impl RecordedRequest {
    /// Header value by (case-insensitive) name.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }

    /// Path plus query string, as the client requested it.
    pub fn path_and_query(&self) -> String {
        match &self.query {
            Some(query) => format!("{}?{}", self.path, query),
            None => self.path.clone(),
        }
    }
}

#[derive(Default)]
struct StubState {
    routes: Mutex<HashMap<String, StubResponse>>,
    requests: Mutex<Vec<RecordedRequest>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Stub Bithumb server bound to `127.0.0.1` on an OS-assigned port.
///
/// Unconfigured paths answer `404`. The server stops when dropped.
pub struct StubExchange {
    addr: SocketAddr,
    state: Arc<StubState>,
    handle: JoinHandle<()>,
}

impl StubExchange {
    /// Bind and start serving.
    pub async fn start() -> anyhow::Result<Self> {
        let state = Arc::new(StubState::default());
        let router = Router::new()
            .fallback(handle_request)
            .with_state(state.clone());

        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;

        let handle = tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, router).await {
                tracing::error!(error = %e, "Stub exchange stopped");
            }
        });

        debug!(%addr, "Stub exchange listening");
        Ok(Self {
            addr,
            state,
            handle,
        })
    }

    /// Base URL to hand to the client.
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Answer `path` with a raw body.
    pub fn respond(&self, path: &str, status: u16, body: impl Into<String>) {
        lock(&self.state.routes).insert(
            path.to_string(),
            StubResponse {
                status,
                body: body.into(),
            },
        );
    }

    /// Answer `path` with a JSON body.
    pub fn respond_json(&self, path: &str, status: u16, body: &Value) {
        self.respond(path, status, body.to_string());
    }

    /// All requests received so far, oldest first.
    pub fn requests(&self) -> Vec<RecordedRequest> {
        lock(&self.state.requests).clone()
    }

    /// Most recent request.
    pub fn last_request(&self) -> Option<RecordedRequest> {
        lock(&self.state.requests).last().cloned()
    }

    /// Number of requests received.
    pub fn request_count(&self) -> usize {
        lock(&self.state.requests).len()
    }
}

impl Drop for StubExchange {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn handle_request(
    State(state): State<Arc<StubState>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: String,
) -> impl IntoResponse {
    let path = uri.path().to_string();

    let recorded = RecordedRequest {
        method: method.to_string(),
        path: path.clone(),
        query: uri.query().map(str::to_string),
        headers: headers
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_string(), v.to_string()))
            })
            .collect(),
        body,
    };
    lock(&state.requests).push(recorded);

    let response = lock(&state.routes).get(&path).cloned();
    match response {
        Some(StubResponse { status, body }) => (
            StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
            [(header::CONTENT_TYPE, "application/json")],
            body,
        ),
        None => (
            StatusCode::NOT_FOUND,
            [(header::CONTENT_TYPE, "application/json")],
            format!(r#"{{"status":"5500","message":"no stub for {}"}}"#, path),
        ),
    }
}
