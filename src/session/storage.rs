//! File-backed persistence for the session.
//!
//! Two entries under the state directory, mirroring the storage contract
//! of the service: `token` holds the raw bearer token, `user` holds the
//! serialized `{username, roles}` record. They are always written together
//! and cleared together, never one without the other.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{AppError, AppResult};
use crate::models::StoredUser;

const TOKEN_ENTRY: &str = "token";
const USER_ENTRY: &str = "user";

#[derive(Debug, Clone)]
pub struct SessionStorage {
    dir: PathBuf,
}

impl SessionStorage {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn entry(&self, name: &str) -> PathBuf {
        self.dir.join(name)
    }

    /// The raw token, if a non-empty one is persisted.
    pub fn read_token(&self) -> Option<String> {
        let raw = fs::read_to_string(self.entry(TOKEN_ENTRY)).ok()?;
        let token = raw.trim_end_matches('\n').to_string();
        if token.is_empty() {
            None
        } else {
            Some(token)
        }
    }

    /// The persisted user record, if present and deserializable. A record
    /// that fails to parse is reported as absent; the store treats that as
    /// corruption and clears everything.
    pub fn read_user(&self) -> Option<StoredUser> {
        let raw = fs::read_to_string(self.entry(USER_ENTRY)).ok()?;
        match serde_json::from_str(&raw) {
            Ok(user) => Some(user),
            Err(e) => {
                tracing::warn!(error = %e, "persisted user record failed to parse");
                None
            }
        }
    }

    /// Persist both entries. Partial writes are avoided by writing the
    /// user record first and the token last; a missing token invalidates
    /// the pair on the next bootstrap either way.
    pub fn write(&self, token: &str, user: &StoredUser) -> AppResult<()> {
        fs::create_dir_all(&self.dir)
            .map_err(|e| AppError::Storage(format!("cannot create {}: {}", self.dir.display(), e)))?;
        let user_json = serde_json::to_string(user)
            .map_err(|e| AppError::Storage(format!("cannot serialize user record: {}", e)))?;
        fs::write(self.entry(USER_ENTRY), user_json)
            .map_err(|e| AppError::Storage(format!("cannot write user record: {}", e)))?;
        fs::write(self.entry(TOKEN_ENTRY), token)
            .map_err(|e| AppError::Storage(format!("cannot write token: {}", e)))?;
        Ok(())
    }

    /// Best-effort removal of both entries. Infallible: logout and
    /// corruption recovery must never fail outward.
    pub fn clear(&self) {
        for name in [TOKEN_ENTRY, USER_ENTRY] {
            let _ = fs::remove_file(self.entry(name));
        }
    }

    /// True when either entry is still present on disk.
    pub fn any_entry_present(&self) -> bool {
        self.entry(TOKEN_ENTRY).exists() || self.entry(USER_ENTRY).exists()
    }
}
