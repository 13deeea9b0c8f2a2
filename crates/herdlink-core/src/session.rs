//! In-memory session state and its on-disk cache.
//!
//! The store is the single source of truth for the credential pair and
//! identity. It is explicitly owned and injected into [`crate::api::ApiClient`]
//! so tests can run isolated sessions side by side. Persistence to
//! `<home>/session.json` is a separate, explicit step; the store itself
//! cannot fail.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;
use std::sync::{Arc, RwLock};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use herdlink_types::Identity;

/// The current authentication state and identity.
///
/// `is_authenticated == true` implies `access_token` is non-empty; the
/// default (logged-out) session has every field at its empty/zero value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Session {
    /// Short-lived bearer credential; empty means "not authenticated".
    pub access_token: String,
    /// Longer-lived credential used only to mint a new access token.
    pub refresh_token: String,
    pub user_id: i64,
    pub full_name: String,
    pub role_name: String,
    pub is_authenticated: bool,
}

impl Session {
    /// Builds an authenticated session from a token pair and identity.
    pub fn authenticated(access_token: String, refresh_token: String, identity: Identity) -> Self {
        Self {
            access_token,
            refresh_token,
            user_id: identity.user_id,
            full_name: identity.full_name,
            role_name: identity.role_name,
            is_authenticated: true,
        }
    }

    pub fn identity(&self) -> Identity {
        Identity {
            user_id: self.user_id,
            full_name: self.full_name.clone(),
            role_name: self.role_name.clone(),
        }
    }
}

/// Shared handle to the live session.
///
/// Cloning is cheap; all clones observe the same state. Writes replace
/// whole fields or the whole record under the lock, so no partial state
/// is ever observable from another component.
#[derive(Debug, Clone, Default)]
pub struct SessionStore {
    inner: Arc<RwLock<Session>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with an existing session (e.g. one
    /// loaded from the session cache).
    pub fn with_session(session: Session) -> Self {
        Self {
            inner: Arc::new(RwLock::new(session)),
        }
    }

    /// Returns the current access token, or an empty string when logged out.
    pub fn access_token(&self) -> String {
        self.read().access_token.clone()
    }

    /// Returns the current refresh token, or an empty string when logged out.
    pub fn refresh_token(&self) -> String {
        self.read().refresh_token.clone()
    }

    /// Replaces the access token only; identity and refresh token are untouched.
    pub fn set_access_token(&self, token: impl Into<String>) {
        self.write().access_token = token.into();
    }

    /// Replaces the entire session and marks it authenticated.
    pub fn login(&self, session: Session) {
        let mut guard = self.write();
        *guard = Session {
            is_authenticated: true,
            ..session
        };
    }

    /// Resets to the default (logged-out) session. Idempotent.
    pub fn logout(&self) {
        *self.write() = Session::default();
    }

    /// Returns a copy of the whole record.
    pub fn snapshot(&self) -> Session {
        self.read().clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.read().is_authenticated
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, Session> {
        self.inner.read().unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, Session> {
        self.inner.write().unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

/// Explicit persistence for the session record.
///
/// Kept out of [`SessionStore`] so the store stays infallible; callers
/// decide when state crosses the process boundary.
pub mod session_cache {
    use super::{Context, OpenOptions, Path, Result, Session, Write, fs};
    use crate::config::paths;

    /// Loads the cached session from disk.
    /// Returns the default (logged-out) session if the file doesn't exist.
    pub fn load() -> Result<Session> {
        load_from(&paths::session_path())
    }

    pub fn load_from(path: &Path) -> Result<Session> {
        if !path.exists() {
            return Ok(Session::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read session from {}", path.display()))?;

        serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse session from {}", path.display()))
    }

    /// Saves the session to disk with restricted permissions (0600).
    pub fn save(session: &Session) -> Result<()> {
        save_to(&paths::session_path(), session)
    }

    pub fn save_to(path: &Path, session: &Session) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }

        let contents =
            serde_json::to_string_pretty(session).context("Failed to serialize session")?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            let mut file = OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .mode(0o600)
                .open(path)
                .with_context(|| format!("Failed to open {} for writing", path.display()))?;
            file.write_all(contents.as_bytes())
                .with_context(|| format!("Failed to write to {}", path.display()))?;
        }

        #[cfg(not(unix))]
        {
            fs::write(path, contents)
                .with_context(|| format!("Failed to write to {}", path.display()))?;
        }

        Ok(())
    }

    /// Removes the cached session. Returns whether a cache existed.
    pub fn clear() -> Result<bool> {
        clear_at(&paths::session_path())
    }

    pub fn clear_at(path: &Path) -> Result<bool> {
        if !path.exists() {
            return Ok(false);
        }
        fs::remove_file(path)
            .with_context(|| format!("Failed to remove {}", path.display()))?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;

    fn sample_session() -> Session {
        Session::authenticated(
            "A1".to_string(),
            "R1".to_string(),
            Identity {
                user_id: 12,
                full_name: "Maya de Boer".to_string(),
                role_name: "herd-manager".to_string(),
            },
        )
    }

    /// Login replaces the whole record and sets the flag.
    #[test]
    fn test_login_replaces_whole_record() {
        let store = SessionStore::new();
        assert!(!store.is_authenticated());

        store.login(sample_session());

        let snap = store.snapshot();
        assert!(snap.is_authenticated);
        assert_eq!(snap.access_token, "A1");
        assert_eq!(snap.full_name, "Maya de Boer");
    }

    /// set_access_token rotates the token and nothing else.
    #[test]
    fn test_set_access_token_only_touches_token() {
        let store = SessionStore::new();
        store.login(sample_session());

        store.set_access_token("A2");

        let snap = store.snapshot();
        assert_eq!(snap.access_token, "A2");
        assert_eq!(snap.refresh_token, "R1");
        assert_eq!(snap.user_id, 12);
        assert!(snap.is_authenticated);
    }

    /// Logout resets every field; doing it twice changes nothing.
    #[test]
    fn test_logout_is_idempotent() {
        let store = SessionStore::new();
        store.login(sample_session());

        store.logout();
        let once = store.snapshot();
        store.logout();
        let twice = store.snapshot();

        assert_eq!(once, Session::default());
        assert_eq!(once, twice);
        assert_eq!(once.access_token, "");
        assert_eq!(once.user_id, 0);
        assert!(!once.is_authenticated);
    }

    /// Clones share state: a write through one handle is visible to all.
    #[test]
    fn test_clones_share_state() {
        let store = SessionStore::new();
        let other = store.clone();

        store.login(sample_session());
        assert_eq!(other.access_token(), "A1");

        other.logout();
        assert_eq!(store.access_token(), "");
    }

    /// Session cache round-trip through a temp file.
    #[test]
    fn test_session_cache_roundtrip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("session.json");

        let session = sample_session();
        session_cache::save_to(&path, &session).unwrap();
        assert!(path.exists());

        let loaded = session_cache::load_from(&path).unwrap();
        assert_eq!(loaded, session);

        assert!(session_cache::clear_at(&path).unwrap());
        assert!(!session_cache::clear_at(&path).unwrap());
        assert_eq!(session_cache::load_from(&path).unwrap(), Session::default());
    }

    /// Cache files are written with owner-only permissions.
    #[cfg(unix)]
    #[test]
    fn test_session_cache_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempdir().unwrap();
        let path = dir.path().join("session.json");
        session_cache::save_to(&path, &sample_session()).unwrap();

        let mode = std::fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }
}
