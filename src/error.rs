//! Error types surfaced to screens.
//!
//! Every variant here is recoverable: screens turn them into a message and
//! let the user retry the action that triggered them.

use std::fmt;

use thiserror::Error;

/// Login-time failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// Email or password left empty; no request is sent.
    #[error("please enter email and password")]
    MissingCredentials,

    /// The auth service answered with a non-2xx status.
    #[error("{0}")]
    Rejected(String),

    /// 2xx response without a token in the body.
    #[error("missing token")]
    MissingToken,

    /// 2xx response whose body could not be decoded.
    #[error("malformed login response: {0}")]
    Malformed(String),

    /// The request never produced a response.
    #[error("network error: {0}")]
    Network(String),
}

/// Which catalog list a fetch was for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogResource {
    Products,
    Categories,
}

impl CatalogResource {
    pub fn as_str(&self) -> &'static str {
        match self {
            CatalogResource::Products => "products",
            CatalogResource::Categories => "categories",
        }
    }
}

impl fmt::Display for CatalogResource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Catalog retrieval failure (network, non-2xx or malformed JSON).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("could not load {resource} ({reason})")]
pub struct FetchError {
    resource: CatalogResource,
    reason: String,
}

impl FetchError {
    pub fn new(resource: CatalogResource, reason: impl Into<String>) -> Self {
        Self {
            resource,
            reason: reason.into(),
        }
    }

    pub fn resource(&self) -> CatalogResource {
        self.resource
    }

    /// Normalized cause, e.g. `"500: Internal Server Error"`.
    pub fn reason(&self) -> &str {
        &self.reason
    }
}

/// Entity kinds that can be opened in a detail screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetailKind {
    Product,
    Category,
}

impl fmt::Display for DetailKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DetailKind::Product => f.write_str("product"),
            DetailKind::Category => f.write_str("category"),
        }
    }
}

/// A detail screen was requested for an entity lacking its identifying field.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NavigationGuardError {
    #[error("{0} not found or missing its id")]
    MissingId(DetailKind),
}
