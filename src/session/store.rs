//! The session store: single source of truth for "who is logged in and
//! what can they do".
//!
//! Exactly one store exists per process (owned by the application
//! context), and it is the only writer of the two persisted entries.
//! Other components read the derived booleans or the token.

use std::sync::{PoisonError, RwLock};

use validator::Validate;

use super::{Session, SessionStorage};
use crate::client::AuthClient;
use crate::error::AppResult;
use crate::models::{LoginRequest, RegisterRequest, RegisterResponse, StoredUser};

#[derive(Debug, Default)]
struct StoreState {
    session: Option<Session>,
    bootstrapped: bool,
}

pub struct SessionStore {
    auth: AuthClient,
    storage: SessionStorage,
    state: RwLock<StoreState>,
}

impl SessionStore {
    pub fn new(auth: AuthClient, storage: SessionStorage) -> Self {
        Self {
            auth,
            storage,
            state: RwLock::new(StoreState::default()),
        }
    }

    /// Rehydrate the session from persisted storage. Never fails outward:
    /// a missing entry or a structurally invalid user record clears both
    /// entries and starts with no session.
    pub fn bootstrap(&self) {
        let token = self.storage.read_token();
        let user = self.storage.read_user();

        let session = match (token, user) {
            (Some(token), Some(user)) if user.is_valid() => Some(Session {
                username: user.username,
                roles: user.roles,
                token,
            }),
            (token, user) => {
                if token.is_some() || user.is_some() || self.storage.any_entry_present() {
                    tracing::warn!("discarding incomplete or invalid persisted session");
                    self.storage.clear();
                }
                None
            }
        };

        match &session {
            Some(s) => tracing::debug!(username = %s.username, "session rehydrated"),
            None => tracing::debug!("starting without a session"),
        }

        let mut state = self.write_state();
        state.session = session;
        state.bootstrapped = true;
    }

    /// Authenticate, persist both entries, and install the in-memory
    /// session. On any failure the session is left untouched and the
    /// error propagates to the caller.
    pub async fn login(&self, username: &str, password: &str) -> AppResult<Session> {
        let request = LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        };
        request.validate()?;

        let response = self.auth.login(&request).await?;

        let user = StoredUser {
            username: response.username,
            roles: response.roles,
        };
        self.storage.write(&response.token, &user)?;

        let session = Session {
            username: user.username,
            roles: user.roles,
            token: response.token,
        };
        // Log the values just computed, not a re-read of shared state.
        tracing::info!(
            username = %session.username,
            roles = session.roles.len(),
            admin = session.is_admin(),
            "login successful"
        );

        self.write_state().session = Some(session.clone());
        Ok(session)
    }

    /// Create an account. Session state is not touched; registering does
    /// not log the user in.
    pub async fn register(
        &self,
        username: &str,
        password: &str,
        wants_admin: bool,
    ) -> AppResult<RegisterResponse> {
        let request = RegisterRequest {
            username: username.to_string(),
            password: password.to_string(),
            is_admin: wants_admin,
        };
        request.validate()?;
        self.auth.register(&request).await
    }

    /// Clear persisted storage and the in-memory session. Synchronous, no
    /// network call, no failure path.
    pub fn logout(&self) {
        self.storage.clear();
        self.write_state().session = None;
        tracing::info!("logged out");
    }

    pub fn is_bootstrapped(&self) -> bool {
        self.read_state().bootstrapped
    }

    pub fn is_authenticated(&self) -> bool {
        self.read_state().session.is_some()
    }

    pub fn is_admin(&self) -> bool {
        self.read_state()
            .session
            .as_ref()
            .map(Session::is_admin)
            .unwrap_or(false)
    }

    /// The bearer token for authenticated requests.
    pub fn token(&self) -> Option<String> {
        self.read_state()
            .session
            .as_ref()
            .map(|s| s.token.clone())
    }

    /// A snapshot of the current session.
    pub fn current(&self) -> Option<Session> {
        self.read_state().session.clone()
    }

    fn read_state(&self) -> std::sync::RwLockReadGuard<'_, StoreState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_state(&self) -> std::sync::RwLockWriteGuard<'_, StoreState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }
}
