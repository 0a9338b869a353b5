//! In-memory `StoreApi` for unit tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Notify;

use crate::api::{session_from_login, StoreApi};
use crate::error::{AuthError, CatalogResource, FetchError};
use crate::models::{Category, LoginResponse, Product};
use crate::session::Session;

pub(crate) struct FakeStore {
    rol_id: Option<i64>,
    login_error: Option<AuthError>,
    products_error: Option<String>,
    categories_error: Option<String>,
    /// When set, product fetches wait for a notification before answering
    gate: Option<Arc<Notify>>,
    login_calls: AtomicUsize,
    category_calls: AtomicUsize,
}

impl FakeStore {
    pub fn with_rol_id(rol_id: Option<i64>) -> Self {
        Self {
            rol_id,
            login_error: None,
            products_error: None,
            categories_error: None,
            gate: None,
            login_calls: AtomicUsize::new(0),
            category_calls: AtomicUsize::new(0),
        }
    }

    pub fn admin() -> Self {
        Self::with_rol_id(Some(1))
    }

    pub fn client() -> Self {
        Self::with_rol_id(Some(2))
    }

    pub fn with_login_error(mut self, err: AuthError) -> Self {
        self.login_error = Some(err);
        self
    }

    pub fn with_products_error(mut self, reason: &str) -> Self {
        self.products_error = Some(reason.to_string());
        self
    }

    pub fn with_categories_error(mut self, reason: &str) -> Self {
        self.categories_error = Some(reason.to_string());
        self
    }

    pub fn with_gate(mut self, gate: Arc<Notify>) -> Self {
        self.gate = Some(gate);
        self
    }

    pub fn login_calls(&self) -> usize {
        self.login_calls.load(Ordering::SeqCst)
    }

    pub fn category_calls(&self) -> usize {
        self.category_calls.load(Ordering::SeqCst)
    }
}

pub(crate) fn sample_products() -> Vec<Product> {
    vec![
        Product {
            id: Some(1),
            nombre: Some("Vestido floral".to_string()),
            precio: 249.9,
            stock: 3,
            descripcion: Some("Talla M".to_string()),
            categoria: None,
        },
        Product {
            id: Some(2),
            nombre: Some("Collar de plata".to_string()),
            precio: 120.0,
            stock: 0,
            descripcion: None,
            categoria: None,
        },
    ]
}

pub(crate) fn sample_categories() -> Vec<Category> {
    vec![
        Category {
            id: Some(1),
            nombre: Some("Ropa".to_string()),
        },
        Category {
            id: Some(2),
            nombre: Some("Joyas".to_string()),
        },
    ]
}

#[async_trait]
impl StoreApi for FakeStore {
    async fn login(&self, email: &str, _password: &str) -> Result<Session, AuthError> {
        self.login_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(err) = &self.login_error {
            return Err(err.clone());
        }
        let body: LoginResponse = serde_json::from_value(serde_json::json!({
            "token": "fake-token",
            "user": {"id": 1, "rol_id": self.rol_id},
        }))
        .map_err(|e| AuthError::Malformed(e.to_string()))?;
        session_from_login(email, body)
    }

    async fn fetch_products(&self) -> Result<Vec<Product>, FetchError> {
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        match &self.products_error {
            Some(reason) => Err(FetchError::new(CatalogResource::Products, reason.clone())),
            None => Ok(sample_products()),
        }
    }

    async fn fetch_categories(&self) -> Result<Vec<Category>, FetchError> {
        self.category_calls.fetch_add(1, Ordering::SeqCst);
        match &self.categories_error {
            Some(reason) => Err(FetchError::new(CatalogResource::Categories, reason.clone())),
            None => Ok(sample_categories()),
        }
    }
}
