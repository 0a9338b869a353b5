//! Mock catalog service for testing
//!
//! Serves GET /productos and GET /categorias. Each route has its own
//! status and body. With `require_concurrent` both routes hold their
//! response until the other one has been requested too.

use axum::{
    extract::State,
    http::{header, StatusCode},
    routing::get,
    Router,
};
use serde_json::{json, Value};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::{Barrier, RwLock};
use tokio::task::JoinHandle;

#[derive(Clone)]
struct Route {
    status: StatusCode,
    body: String,
    hits: usize,
}

impl Route {
    fn ok(body: Value) -> Self {
        Self {
            status: StatusCode::OK,
            body: body.to_string(),
            hits: 0,
        }
    }
}

struct MockCatalogState {
    products: Route,
    categories: Route,
    barrier: Option<Arc<Barrier>>,
}

type SharedState = Arc<RwLock<MockCatalogState>>;

pub struct MockCatalogServer {
    addr: SocketAddr,
    state: SharedState,
    handle: JoinHandle<()>,
}

pub fn sample_products() -> Value {
    json!([
        {"id": 1, "nombre": "Vestido floral", "precio": "249.90", "stock": 3,
         "descripcion": "Talla M", "categoria": {"id": 1, "nombre": "Ropa"}},
        {"id": 2, "nombre": "Collar de plata", "precio": 120, "stock": 0,
         "categoria": 2},
        {"id": 3, "precio": null}
    ])
}

pub fn sample_categories() -> Value {
    json!([
        {"id": 1, "nombre": "Ropa"},
        {"id": 2, "nombre": "Joyas"}
    ])
}

impl MockCatalogServer {
    /// Start a mock catalog server on a random port with sample data
    pub async fn start() -> Self {
        let state = Arc::new(RwLock::new(MockCatalogState {
            products: Route::ok(sample_products()),
            categories: Route::ok(sample_categories()),
            barrier: None,
        }));

        let app = Router::new()
            .route("/productos", get(handle_products))
            .route("/categorias", get(handle_categories))
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

    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub async fn set_products(&self, status: StatusCode, body: &str) {
        let mut state = self.state.write().await;
        state.products.status = status;
        state.products.body = body.to_string();
    }

    pub async fn set_categories(&self, status: StatusCode, body: &str) {
        let mut state = self.state.write().await;
        state.categories.status = status;
        state.categories.body = body.to_string();
    }

    /// Make each route wait until both have been requested
    pub async fn require_concurrent(&self) {
        self.state.write().await.barrier = Some(Arc::new(Barrier::new(2)));
    }

    pub async fn product_hits(&self) -> usize {
        self.state.read().await.products.hits
    }

    pub async fn category_hits(&self) -> usize {
        self.state.read().await.categories.hits
    }

    pub async fn stop(self) {
        self.handle.abort();
    }
}

type JsonReply = (StatusCode, [(header::HeaderName, &'static str); 1], String);

async fn handle_products(State(state): State<SharedState>) -> JsonReply {
    let (route, barrier) = {
        let mut state = state.write().await;
        state.products.hits += 1;
        (state.products.clone(), state.barrier.clone())
    };
    reply(route, barrier).await
}

async fn handle_categories(State(state): State<SharedState>) -> JsonReply {
    let (route, barrier) = {
        let mut state = state.write().await;
        state.categories.hits += 1;
        (state.categories.clone(), state.barrier.clone())
    };
    reply(route, barrier).await
}

async fn reply(route: Route, barrier: Option<Arc<Barrier>>) -> JsonReply {
    if let Some(barrier) = barrier {
        barrier.wait().await;
    }
    (
        route.status,
        [(header::CONTENT_TYPE, "application/json")],
        route.body,
    )
}
