//! Per-screen catalog loading.
//!
//! A loader belongs to one mounted home screen. `load` is the only way into
//! `Loading`; there is no automatic retry, a failed load stays failed until
//! the screen is mounted again.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::{info, warn};

use crate::api::StoreApi;
use crate::bus::{AppEvent, SharedBus};
use crate::error::FetchError;
use crate::models::CatalogSnapshot;
use crate::session::Role;

#[derive(Debug, Clone, PartialEq)]
pub enum LoadState {
    Loading,
    Loaded(CatalogSnapshot),
    /// User-facing message; no catalog data is rendered in this state
    Error(String),
}

impl LoadState {
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading)
    }

    pub fn snapshot(&self) -> Option<&CatalogSnapshot> {
        match self {
            LoadState::Loaded(snapshot) => Some(snapshot),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            LoadState::Error(message) => Some(message),
            _ => None,
        }
    }
}

/// Message shown when the load fails. Admins get the cause, clients a
/// generic line.
pub fn failure_message(role: Role, err: &FetchError) -> String {
    match role {
        Role::Admin => format!("Could not load data: {}.", err),
        Role::Client => "Could not load the product catalog.".to_string(),
    }
}

pub struct CatalogLoader {
    api: Arc<dyn StoreApi>,
    bus: SharedBus,
    role: Role,
    state: watch::Sender<LoadState>,
}

impl CatalogLoader {
    /// A freshly mounted screen starts out loading.
    pub fn new(api: Arc<dyn StoreApi>, bus: SharedBus, role: Role) -> Self {
        let (state, _) = watch::channel(LoadState::Loading);
        Self {
            api,
            bus,
            role,
            state,
        }
    }

    pub fn role(&self) -> Role {
        self.role
    }

    /// Watch state changes (for the renderer's spinner/list/error switch).
    pub fn subscribe(&self) -> watch::Receiver<LoadState> {
        self.state.subscribe()
    }

    pub fn state(&self) -> LoadState {
        self.state.borrow().clone()
    }

    /// Run one fetch cycle and return the state it ended in.
    pub async fn load(&self) -> LoadState {
        self.state.send_replace(LoadState::Loading);

        let next = match self.api.fetch_catalog().await {
            Ok(snapshot) => {
                info!(
                    role = %self.role,
                    products = snapshot.products.len(),
                    categories = snapshot.categories.len(),
                    "Catalog loaded"
                );
                self.bus.publish(AppEvent::CatalogLoaded {
                    products: snapshot.products.len(),
                    categories: snapshot.categories.len(),
                });
                LoadState::Loaded(snapshot)
            }
            Err(e) => {
                warn!(role = %self.role, "Catalog load failed: {}", e);
                let message = failure_message(self.role, &e);
                self.bus.publish(AppEvent::CatalogFailed {
                    message: message.clone(),
                });
                LoadState::Error(message)
            }
        };

        self.state.send_replace(next.clone());
        next
    }
}
