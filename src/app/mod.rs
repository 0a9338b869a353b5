//! Top-level application state.
//!
//! `AppController` owns the session and the active navigator. Screens get
//! `&SessionState` and go through `login`/`logout` for transitions; the
//! navigator is rebuilt on every transition so no screen history survives a
//! role change.

use std::sync::Arc;

use tracing::debug;

use crate::api::StoreApi;
use crate::bus::SharedBus;
use crate::catalog::CatalogLoader;
use crate::error::AuthError;
use crate::router::{Navigator, ScreenSet};
use crate::session::{Credentials, Session, SessionController, SessionState};

pub struct AppController {
    api: Arc<dyn StoreApi>,
    bus: SharedBus,
    session: SessionController,
    navigator: Navigator,
}

impl AppController {
    pub fn new(api: Arc<dyn StoreApi>, bus: SharedBus) -> Self {
        let session = SessionController::new(api.clone(), bus.clone());
        let navigator = Navigator::for_session(session.state(), bus.clone());
        Self {
            api,
            bus,
            session,
            navigator,
        }
    }

    pub fn bus(&self) -> &SharedBus {
        &self.bus
    }

    pub fn session(&self) -> &SessionState {
        self.session.state()
    }

    pub fn screen_set(&self) -> ScreenSet {
        self.navigator.screen_set()
    }

    pub fn navigator(&self) -> &Navigator {
        &self.navigator
    }

    pub fn navigator_mut(&mut self) -> &mut Navigator {
        &mut self.navigator
    }

    /// Log in and switch to the screen set for the resulting role.
    /// A failed attempt leaves both session and navigator as they were.
    pub async fn login(&mut self, credentials: &Credentials) -> Result<Session, AuthError> {
        let session = self.session.login(credentials).await?;
        self.reset_navigation();
        Ok(session)
    }

    pub fn logout(&mut self) {
        self.session.logout();
        self.reset_navigation();
    }

    /// Loader for the home screen of the current role, or `None` while
    /// logged out.
    pub fn catalog_loader(&self) -> Option<CatalogLoader> {
        let role = self.session.state().session()?.role;
        Some(CatalogLoader::new(self.api.clone(), self.bus.clone(), role))
    }

    fn reset_navigation(&mut self) {
        self.navigator = Navigator::for_session(self.session.state(), self.bus.clone());
        debug!(screen_set = ?self.navigator.screen_set(), "Navigation reset");
    }
}
