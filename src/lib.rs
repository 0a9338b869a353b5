//! Bazar BEG client core
//!
//! The non-visual half of the Bazar BEG storefront/admin app.
//!
//! This library provides:
//! - Login against the auth service and role resolution (admin vs client)
//! - Role-based screen selection with guarded detail navigation
//! - Concurrent product/category catalog loading with loading/error states
//! - An event bus the shell subscribes to for toasts and logs

pub mod api;
pub mod app;
pub mod bus;
pub mod catalog;
pub mod config;
pub mod error;
pub mod models;
pub mod router;
pub mod session;

#[cfg(test)]
mod testing;
