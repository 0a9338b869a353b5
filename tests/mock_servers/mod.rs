//! Mock servers for integration testing
//!
//! These mock servers simulate the two remote services (auth and catalog)
//! so the HTTP client can be exercised end to end without the network.

#![allow(dead_code)]

pub mod auth;
pub mod catalog;

pub use auth::MockAuthServer;
pub use catalog::MockCatalogServer;
