//! Role-based screen selection and detail navigation.
//!
//! The reachable screens are a pure function of the session state. Each
//! screen set gets its own navigator variant, so a client navigator simply
//! has no way to open a detail screen and a logged-out one has nothing but
//! the login screen.

use std::fmt;

use tracing::{debug, warn};

use crate::bus::{AppEvent, SharedBus};
use crate::error::{DetailKind, NavigationGuardError};
use crate::models::{Category, Product};
use crate::session::{Role, SessionState};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScreenKind {
    Login,
    AdminHome,
    ProductDetail,
    CategoryDetail,
    ClientHome,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenSet {
    /// Only the login screen
    Unauthenticated,
    /// Catalog home plus product/category detail
    Admin,
    /// Read-only catalog, no detail navigation
    Client,
}

impl ScreenSet {
    pub fn screens(&self) -> &'static [ScreenKind] {
        match self {
            ScreenSet::Unauthenticated => &[ScreenKind::Login],
            ScreenSet::Admin => &[
                ScreenKind::AdminHome,
                ScreenKind::ProductDetail,
                ScreenKind::CategoryDetail,
            ],
            ScreenSet::Client => &[ScreenKind::ClientHome],
        }
    }

    pub fn contains(&self, kind: ScreenKind) -> bool {
        self.screens().contains(&kind)
    }

    /// Screen shown on entry
    pub fn home(&self) -> ScreenKind {
        self.screens()[0]
    }
}

pub fn select_screen_set(state: &SessionState) -> ScreenSet {
    match state {
        SessionState::LoggedOut => ScreenSet::Unauthenticated,
        SessionState::LoggedIn(session) => match session.role {
            Role::Admin => ScreenSet::Admin,
            Role::Client => ScreenSet::Client,
        },
    }
}

// =============================================================================
// Detail screens
// =============================================================================

/// Product detail, only constructible for a product with a positive id.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductDetail {
    id: i64,
    product: Product,
}

impl ProductDetail {
    pub fn open(product: Product) -> Result<Self, NavigationGuardError> {
        let id = product
            .id
            .filter(|id| *id > 0)
            .ok_or(NavigationGuardError::MissingId(DetailKind::Product))?;
        Ok(Self { id, product })
    }

    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn product(&self) -> &Product {
        &self.product
    }

    pub fn title(&self) -> &str {
        self.product
            .nombre
            .as_deref()
            .filter(|n| !n.trim().is_empty())
            .unwrap_or("Product detail")
    }
}

/// Category detail, only constructible for a category with a positive id.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryDetail {
    id: i64,
    category: Category,
}

impl CategoryDetail {
    pub fn open(category: Category) -> Result<Self, NavigationGuardError> {
        let id = category
            .id
            .filter(|id| *id > 0)
            .ok_or(NavigationGuardError::MissingId(DetailKind::Category))?;
        Ok(Self { id, category })
    }

    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn category(&self) -> &Category {
        &self.category
    }

    pub fn title(&self) -> &str {
        self.category
            .nombre
            .as_deref()
            .filter(|n| !n.trim().is_empty())
            .unwrap_or("Category detail")
    }
}

/// Admin actions on a detail screen. Neither is backed by the API yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetailAction {
    Edit,
    Delete,
}

impl fmt::Display for DetailAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DetailAction::Edit => f.write_str("Edit"),
            DetailAction::Delete => f.write_str("Delete"),
        }
    }
}

/// Message shown when an admin triggers an action the API does not offer.
pub fn unavailable_action_message(kind: DetailKind, action: DetailAction) -> String {
    format!("{} {} is not available yet.", action, kind)
}

// =============================================================================
// Navigators
// =============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum AdminScreen {
    Home,
    ProductDetail(ProductDetail),
    CategoryDetail(CategoryDetail),
}

impl AdminScreen {
    pub fn kind(&self) -> ScreenKind {
        match self {
            AdminScreen::Home => ScreenKind::AdminHome,
            AdminScreen::ProductDetail(_) => ScreenKind::ProductDetail,
            AdminScreen::CategoryDetail(_) => ScreenKind::CategoryDetail,
        }
    }

    pub fn title(&self) -> &str {
        match self {
            AdminScreen::Home => "Bazar BEG - Admin",
            AdminScreen::ProductDetail(detail) => detail.title(),
            AdminScreen::CategoryDetail(detail) => detail.title(),
        }
    }
}

/// Stack navigator for the admin screen set. The home screen is always at
/// the bottom and cannot be popped.
pub struct AdminNavigator {
    stack: Vec<AdminScreen>,
    bus: SharedBus,
}

impl AdminNavigator {
    pub fn new(bus: SharedBus) -> Self {
        Self {
            stack: vec![AdminScreen::Home],
            bus,
        }
    }

    pub fn current(&self) -> &AdminScreen {
        self.stack.last().unwrap_or(&AdminScreen::Home)
    }

    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Push a product detail screen.
    ///
    /// When the guard rejects the product the stack is left on the screen
    /// the user came from and the error is returned for display.
    pub fn open_product(&mut self, product: Product) -> Result<(), NavigationGuardError> {
        let detail = ProductDetail::open(product).map_err(|e| self.blocked(e))?;
        debug!(id = detail.id(), "Opening product detail");
        self.stack.push(AdminScreen::ProductDetail(detail));
        Ok(())
    }

    pub fn open_category(&mut self, category: Category) -> Result<(), NavigationGuardError> {
        let detail = CategoryDetail::open(category).map_err(|e| self.blocked(e))?;
        debug!(id = detail.id(), "Opening category detail");
        self.stack.push(AdminScreen::CategoryDetail(detail));
        Ok(())
    }

    /// Pop one screen. Returns false when already on the home screen.
    pub fn back(&mut self) -> bool {
        if self.stack.len() > 1 {
            self.stack.pop();
            true
        } else {
            false
        }
    }

    fn blocked(&self, err: NavigationGuardError) -> NavigationGuardError {
        warn!(current = ?self.current().kind(), "Navigation blocked: {}", err);
        self.bus.publish(AppEvent::NavigationBlocked {
            message: err.to_string(),
        });
        err
    }
}

/// The navigator for whatever screen set the session allows.
pub enum Navigator {
    Login,
    Admin(AdminNavigator),
    Client,
}

impl Navigator {
    /// Build a fresh navigator for the given session state. Nothing from a
    /// previous navigator carries over.
    pub fn for_session(state: &SessionState, bus: SharedBus) -> Self {
        match select_screen_set(state) {
            ScreenSet::Unauthenticated => Navigator::Login,
            ScreenSet::Admin => Navigator::Admin(AdminNavigator::new(bus)),
            ScreenSet::Client => Navigator::Client,
        }
    }

    pub fn screen_set(&self) -> ScreenSet {
        match self {
            Navigator::Login => ScreenSet::Unauthenticated,
            Navigator::Admin(_) => ScreenSet::Admin,
            Navigator::Client => ScreenSet::Client,
        }
    }

    pub fn current_kind(&self) -> ScreenKind {
        match self {
            Navigator::Login => ScreenKind::Login,
            Navigator::Admin(nav) => nav.current().kind(),
            Navigator::Client => ScreenKind::ClientHome,
        }
    }

    pub fn title(&self) -> &str {
        match self {
            Navigator::Login => "Bazar BEG",
            Navigator::Admin(nav) => nav.current().title(),
            Navigator::Client => "Bazar BEG - Online Store",
        }
    }

    pub fn admin(&mut self) -> Option<&mut AdminNavigator> {
        match self {
            Navigator::Admin(nav) => Some(nav),
            _ => None,
        }
    }
}
