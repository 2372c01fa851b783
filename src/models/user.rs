//! User identity types.

use serde::{Deserialize, Serialize};

/// Role marker granting access to administrative operations and views.
pub const ADMIN_ROLE: &str = "ADMIN";

/// The persisted user record — the second of the two storage entries,
/// alongside the raw token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredUser {
    pub username: String,
    // No serde default: a record without roles is structurally invalid.
    pub roles: Vec<String>,
}

impl StoredUser {
    /// Structural validity of a rehydrated record.
    pub fn is_valid(&self) -> bool {
        !self.username.is_empty()
    }
}

/// One row of the registered-user directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserSummary {
    pub username: String,
}
