//! Store API client
//!
//! Talks to two services: the auth service (`/auth/Login`) and the catalog
//! service (`/productos`, `/categorias` and their image routes). Every
//! failure is normalized into [`AuthError`] or [`FetchError`]; nothing is
//! retried here.

mod images;
mod response;

pub use images::{placeholder_url, ImageSource};
pub use response::status_line;

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::{AuthError, CatalogResource, FetchError};
use crate::models::{CatalogSnapshot, Category, LoginRequest, LoginResponse, Product};
use crate::session::{Role, Session};

/// Operations screens need from the backend.
///
/// `ApiClient` is the HTTP implementation; tests swap in fakes.
#[async_trait]
pub trait StoreApi: Send + Sync {
    async fn login(&self, email: &str, password: &str) -> Result<Session, AuthError>;

    async fn fetch_products(&self) -> Result<Vec<Product>, FetchError>;

    async fn fetch_categories(&self) -> Result<Vec<Category>, FetchError>;

    /// Fetch both lists concurrently.
    ///
    /// Waits for both requests to settle. If either failed the whole
    /// snapshot is discarded; when both failed the products error wins.
    async fn fetch_catalog(&self) -> Result<CatalogSnapshot, FetchError> {
        let (products, categories) =
            futures::join!(self.fetch_products(), self.fetch_categories());
        Ok(CatalogSnapshot {
            products: products?,
            categories: categories?,
        })
    }
}

const LOGIN_PATH: &str = "/auth/Login";
const PRODUCTS_PATH: &str = "/productos";
const CATEGORIES_PATH: &str = "/categorias";

#[derive(Clone, Debug)]
pub struct ApiClient {
    client: Client,
    auth_url: String,
    catalog_url: String,
}

impl ApiClient {
    /// Build a client for the given service base URLs.
    ///
    /// No request timeout is set; the transport default applies.
    pub fn new(auth_url: &str, catalog_url: &str) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .user_agent(concat!("bazar-client/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self::with_client(client, auth_url, catalog_url))
    }

    pub fn from_config(config: &Config) -> Result<Self, reqwest::Error> {
        Self::new(&config.auth_url, &config.catalog_url)
    }

    pub fn with_client(client: Client, auth_url: &str, catalog_url: &str) -> Self {
        Self {
            client,
            auth_url: auth_url.trim_end_matches('/').to_string(),
            catalog_url: catalog_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn auth_url(&self) -> &str {
        &self.auth_url
    }

    pub fn catalog_url(&self) -> &str {
        &self.catalog_url
    }

    pub fn product_image(&self, id: i64) -> ImageSource {
        ImageSource::product(&self.catalog_url, id)
    }

    pub fn category_image(&self, id: i64) -> ImageSource {
        ImageSource::category(&self.catalog_url, id)
    }

    async fn get_list<T: DeserializeOwned>(
        &self,
        resource: CatalogResource,
        path: &str,
    ) -> Result<Vec<T>, FetchError> {
        let url = format!("{}{}", self.catalog_url, path);
        debug!(%url, %resource, "Catalog request");

        let response = self.client.get(&url).send().await.map_err(|e| {
            warn!(%resource, "Catalog request failed: {}", e);
            FetchError::new(resource, e.to_string())
        })?;

        if !response.status().is_success() {
            let reason = response::error_message(response).await;
            warn!(%resource, "Catalog request rejected: {}", reason);
            return Err(FetchError::new(resource, reason));
        }

        let items: Vec<T> = response.json().await.map_err(|e| {
            warn!(%resource, "Catalog response unreadable: {}", e);
            FetchError::new(resource, format!("invalid response body: {}", e))
        })?;

        debug!(%resource, count = items.len(), "Catalog response");
        Ok(items)
    }
}

#[async_trait]
impl StoreApi for ApiClient {
    async fn login(&self, email: &str, password: &str) -> Result<Session, AuthError> {
        let url = format!("{}{}", self.auth_url, LOGIN_PATH);
        debug!(%url, email, "Login request");

        let response = self
            .client
            .post(&url)
            .json(&LoginRequest { email, password })
            .send()
            .await
            .map_err(|e| AuthError::Network(e.to_string()))?;

        if !response.status().is_success() {
            return Err(AuthError::Rejected(
                response::error_message(response).await,
            ));
        }

        let body: LoginResponse = response
            .json()
            .await
            .map_err(|e| AuthError::Malformed(e.to_string()))?;

        session_from_login(email, body)
    }

    async fn fetch_products(&self) -> Result<Vec<Product>, FetchError> {
        self.get_list(CatalogResource::Products, PRODUCTS_PATH).await
    }

    async fn fetch_categories(&self) -> Result<Vec<Category>, FetchError> {
        self.get_list(CatalogResource::Categories, CATEGORIES_PATH)
            .await
    }
}

/// Turn a 2xx login body into a session.
pub fn session_from_login(email: &str, body: LoginResponse) -> Result<Session, AuthError> {
    let token = body
        .token
        .filter(|t| !t.is_empty())
        .ok_or(AuthError::MissingToken)?;
    let user = body.user.unwrap_or_default();

    Ok(Session {
        token,
        email: email.to_string(),
        user_id: user.id,
        role: Role::from_rol_id(user.rol_id.as_ref()),
        user,
    })
}
