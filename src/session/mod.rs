//! Session ownership: persisted state, the in-memory store, and the
//! navigation guard built on top of it.

pub mod guard;
pub mod storage;
pub mod store;

pub use guard::{AccessPolicy, GuardDecision, RouteGuard};
pub use storage::SessionStorage;
pub use store::SessionStore;

use crate::models::ADMIN_ROLE;

/// The authenticated identity: who is logged in, with which roles, under
/// which bearer token. Exists iff a login succeeded and was not cleared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub username: String,
    pub roles: Vec<String>,
    pub token: String,
}

impl Session {
    pub fn is_admin(&self) -> bool {
        self.roles.iter().any(|r| r == ADMIN_ROLE)
    }
}
