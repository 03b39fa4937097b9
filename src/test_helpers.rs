//! In-process stand-in for the recovery backend.
//!
//! `MockBackend` binds an axum server on an ephemeral port, answers each
//! `(method, path)` with a canned response, and records every request so
//! tests can assert on headers and bodies.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::Router;
use axum::body::Body;
use axum::extract::{Request, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::Response;
use serde_json::{Value, json};

use crate::config::ClientConfig;
use crate::net::api::ApiClient;
use crate::state::store::{MemoryTokenStore, TokenStore};

#[derive(Clone, Debug)]
pub struct Recorded {
    pub method: String,
    pub path: String,
    pub query: Option<String>,
    pub headers: HeaderMap,
    pub body: String,
}

impl Recorded {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    pub fn json(&self) -> Value {
        serde_json::from_str(&self.body).expect("recorded body should be JSON")
    }
}

#[derive(Clone, Debug)]
struct Canned {
    status: u16,
    body: Value,
    set_cookie: Option<String>,
}

#[derive(Clone, Default)]
struct Shared {
    routes: Arc<Mutex<HashMap<(String, String), Canned>>>,
    requests: Arc<Mutex<Vec<Recorded>>>,
}

pub struct MockBackend {
    pub origin: String,
    shared: Shared,
}

impl MockBackend {
    pub async fn start() -> Self {
        let shared = Shared::default();
        let app = Router::new().fallback(handle).with_state(shared.clone());
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("mock backend should bind");
        let addr = listener.local_addr().expect("mock backend should have an address");
        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });
        Self { origin: format!("http://{addr}"), shared }
    }

    /// Answer `method path` with `status` and a JSON body.
    pub fn respond(&self, method: &str, path: &str, status: u16, body: Value) {
        self.insert(method, path, Canned { status, body, set_cookie: None });
    }

    /// Same as [`respond`](Self::respond) plus a `Set-Cookie` header.
    pub fn respond_with_cookie(&self, method: &str, path: &str, status: u16, body: Value, cookie: &str) {
        self.insert(method, path, Canned { status, body, set_cookie: Some(cookie.to_owned()) });
    }

    fn insert(&self, method: &str, path: &str, canned: Canned) {
        self.shared
            .routes
            .lock()
            .expect("routes lock")
            .insert((method.to_owned(), path.to_owned()), canned);
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.shared.requests.lock().expect("requests lock").clone()
    }

    pub fn requests_to(&self, path: &str) -> Vec<Recorded> {
        self.requests().into_iter().filter(|r| r.path == path).collect()
    }

    pub fn last(&self) -> Recorded {
        self.requests().pop().expect("at least one request recorded")
    }

    pub fn config(&self) -> ClientConfig {
        ClientConfig::default().with_backend_url(&self.origin)
    }

    /// Gateway backed by an in-memory store seeded with `token`.
    pub fn client(&self, token: Option<&str>) -> (ApiClient, Arc<MemoryTokenStore>) {
        self.client_with(&self.config(), token)
    }

    /// Same as [`client`](Self::client) with the cookie jar switched on.
    pub fn cookie_client(&self, token: Option<&str>) -> (ApiClient, Arc<MemoryTokenStore>) {
        let config = ClientConfig { send_cookies: true, ..self.config() };
        self.client_with(&config, token)
    }

    fn client_with(&self, config: &ClientConfig, token: Option<&str>) -> (ApiClient, Arc<MemoryTokenStore>) {
        let store = Arc::new(token.map_or_else(MemoryTokenStore::new, MemoryTokenStore::with_token));
        let dyn_store: Arc<dyn TokenStore> = store.clone();
        let client = ApiClient::new(config, dyn_store).expect("client should build");
        (client, store)
    }
}

async fn handle(State(shared): State<Shared>, request: Request) -> Response {
    let (parts, body) = request.into_parts();
    let bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap_or_default();
    let recorded = Recorded {
        method: parts.method.to_string(),
        path: parts.uri.path().to_owned(),
        query: parts.uri.query().map(str::to_owned),
        headers: parts.headers,
        body: String::from_utf8_lossy(&bytes).into_owned(),
    };

    let key = (recorded.method.clone(), recorded.path.clone());
    shared.requests.lock().expect("requests lock").push(recorded);

    let canned = shared
        .routes
        .lock()
        .expect("routes lock")
        .get(&key)
        .cloned()
        .unwrap_or(Canned { status: 404, body: json!({"detail": "Not Found"}), set_cookie: None });

    let mut builder = Response::builder()
        .status(StatusCode::from_u16(canned.status).expect("valid status"))
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(cookie) = canned.set_cookie {
        builder = builder.header(header::SET_COOKIE, cookie);
    }
    builder
        .body(Body::from(canned.body.to_string()))
        .expect("mock response should build")
}

/// Address nothing listens on, for connection-failure tests.
pub async fn dead_origin() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);
    format!("http://{addr}")
}
