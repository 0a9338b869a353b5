//! Session and role state machine.
//!
//! Two states, `LoggedOut` and `LoggedIn(Session)`. The controller owns the
//! state; everything else gets it by shared reference and can only move it
//! through [`SessionController::login`] and [`SessionController::logout`].

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{info, warn};

use crate::api::StoreApi;
use crate::bus::{AppEvent, SharedBus};
use crate::error::AuthError;
use crate::models::AuthUser;

/// `rol_id` the auth service assigns to administrators
pub const ADMIN_ROL_ID: i64 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    Admin,
    Client,
}

impl Role {
    /// Map the auth service's `rol_id`.
    ///
    /// Only a JSON number equal to `1` is an administrator (`1.0` included).
    /// Anything else, strings like `"1"` and a missing value included, is a
    /// client: unknown roles never gain admin screens.
    pub fn from_rol_id(rol_id: Option<&Value>) -> Self {
        match rol_id {
            Some(Value::Number(n)) if n.as_f64() == Some(ADMIN_ROL_ID as f64) => Role::Admin,
            _ => Role::Client,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "ADMIN",
            Role::Client => "CLIENT",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An authenticated session. Only exists while logged in, so the token is
/// always present.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub token: String,
    pub email: String,
    pub user_id: Option<i64>,
    pub role: Role,
    /// Raw user record from the auth service
    pub user: AuthUser,
}

impl Session {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub enum SessionState {
    #[default]
    LoggedOut,
    LoggedIn(Session),
}

impl SessionState {
    pub fn session(&self) -> Option<&Session> {
        match self {
            SessionState::LoggedOut => None,
            SessionState::LoggedIn(session) => Some(session),
        }
    }

    pub fn is_logged_in(&self) -> bool {
        matches!(self, SessionState::LoggedIn(_))
    }
}

/// Login form input.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }

    pub fn is_complete(&self) -> bool {
        !self.email.trim().is_empty() && !self.password.is_empty()
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

pub struct SessionController {
    api: Arc<dyn StoreApi>,
    bus: SharedBus,
    state: SessionState,
}

impl SessionController {
    pub fn new(api: Arc<dyn StoreApi>, bus: SharedBus) -> Self {
        Self {
            api,
            bus,
            state: SessionState::LoggedOut,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Authenticate and move to `LoggedIn`.
    ///
    /// On failure the state is left untouched and the error is handed back
    /// for the login screen to display.
    pub async fn login(&mut self, credentials: &Credentials) -> Result<Session, AuthError> {
        if !credentials.is_complete() {
            return Err(AuthError::MissingCredentials);
        }

        let email = credentials.email.trim();
        match self.api.login(email, &credentials.password).await {
            Ok(session) => {
                info!(email = %session.email, role = %session.role, "Logged in");
                self.bus.publish(AppEvent::LoggedIn {
                    email: session.email.clone(),
                    role: session.role,
                });
                self.state = SessionState::LoggedIn(session.clone());
                Ok(session)
            }
            Err(e) => {
                warn!(email = %email, "Login failed: {}", e);
                self.bus.publish(AppEvent::LoginFailed {
                    message: e.to_string(),
                });
                Err(e)
            }
        }
    }

    /// Drop the session. Always ends in `LoggedOut`.
    pub fn logout(&mut self) {
        if let SessionState::LoggedIn(session) = std::mem::take(&mut self.state) {
            info!(email = %session.email, "Logged out");
            self.bus.publish(AppEvent::LoggedOut);
        }
    }
}
