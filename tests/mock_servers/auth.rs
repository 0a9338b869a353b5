//! Mock auth service for testing
//!
//! Serves POST /auth/Login with a configurable status and body and records
//! every request body it receives.

use axum::{
    extract::State,
    http::{header, StatusCode},
    routing::post,
    Json, Router,
};
use serde_json::{json, Value};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;

struct MockAuthState {
    status: StatusCode,
    body: String,
    requests: Vec<Value>,
}

pub struct MockAuthServer {
    addr: SocketAddr,
    state: Arc<RwLock<MockAuthState>>,
    handle: JoinHandle<()>,
}

impl MockAuthServer {
    /// Start a mock auth server on a random port.
    /// Until configured it accepts any login as an admin.
    pub async fn start() -> Self {
        let state = Arc::new(RwLock::new(MockAuthState {
            status: StatusCode::OK,
            body: json!({"token": "abc", "user": {"id": 1, "rol_id": 1}}).to_string(),
            requests: Vec::new(),
        }));

        let app = Router::new()
            .route("/auth/Login", post(handle_login))
            .with_state(state.clone());

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            addr,
            state,
            handle,
        }
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Base URL, e.g. `http://127.0.0.1:41234`
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Answer logins with the given status and JSON body
    pub async fn respond_with(&self, status: StatusCode, body: Value) {
        self.respond_raw(status, &body.to_string()).await;
    }

    /// Answer logins with the given status and a raw (possibly non-JSON) body
    pub async fn respond_raw(&self, status: StatusCode, body: &str) {
        let mut state = self.state.write().await;
        state.status = status;
        state.body = body.to_string();
    }

    /// Successful login for a user with the given role id (`None` omits it)
    pub async fn login_as(&self, token: &str, rol_id: Option<i64>) {
        let user = match rol_id {
            Some(rol_id) => json!({"id": 7, "rol_id": rol_id, "nombre": "Test"}),
            None => json!({"id": 7, "nombre": "Test"}),
        };
        self.respond_with(StatusCode::OK, json!({"token": token, "user": user}))
            .await;
    }

    /// Successful login with `rol_id` sent exactly as given (any JSON shape)
    pub async fn login_with_raw_rol_id(&self, token: &str, rol_id: Value) {
        self.respond_with(
            StatusCode::OK,
            json!({"token": token, "user": {"id": "7", "rol_id": rol_id}}),
        )
        .await;
    }

    /// Request bodies received so far
    pub async fn requests(&self) -> Vec<Value> {
        self.state.read().await.requests.clone()
    }

    pub async fn stop(self) {
        self.handle.abort();
    }
}

async fn handle_login(
    State(state): State<Arc<RwLock<MockAuthState>>>,
    Json(request): Json<Value>,
) -> (StatusCode, [(header::HeaderName, &'static str); 1], String) {
    let mut state = state.write().await;
    state.requests.push(request);
    (
        state.status,
        [(header::CONTENT_TYPE, "application/json")],
        state.body.clone(),
    )
}
