//! Client session store
//!
//! An explicit session context object with a defined lifecycle:
//! created at app bootstrap, updated only by login and logout,
//! injected wherever the token is needed. The token itself is the
//! session; there is no server-side counterpart.
//!
//! The store never validates the token it holds. Presence is the only
//! thing callers may ask about; a stale token simply earns a 401 from
//! the server on its next use.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// Well-known storage key for the persisted token
pub const TOKEN_STORAGE_KEY: &str = "token";

/// Key-value persistence backend for the session token
///
/// Implementations must provide atomic reads and removals: a read
/// concurrent with a clear returns either the old value or nothing,
/// never a torn string.
pub trait TokenStorage: Send + Sync {
    fn read(&self, key: &str) -> Option<String>;
    fn write(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

/// In-memory storage backend
#[derive(Default)]
pub struct MemoryStorage {
    values: RwLock<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TokenStorage for MemoryStorage {
    fn read(&self, key: &str) -> Option<String> {
        self.values
            .read()
            .ok()
            .and_then(|map| map.get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) {
        if let Ok(mut map) = self.values.write() {
            map.insert(key.to_string(), value.to_string());
        }
    }

    fn remove(&self, key: &str) {
        if let Ok(mut map) = self.values.write() {
            map.remove(key);
        }
    }
}

/// The client session: holds the most recently issued token
///
/// Cloning shares the underlying storage, so every component sees the
/// same session state.
#[derive(Clone)]
pub struct SessionStore {
    storage: Arc<dyn TokenStorage>,
}

impl SessionStore {
    /// Create a session store backed by in-memory storage
    pub fn new() -> Self {
        Self::with_storage(Arc::new(MemoryStorage::new()))
    }

    /// Create a session store over a custom persistence backend
    pub fn with_storage(storage: Arc<dyn TokenStorage>) -> Self {
        Self { storage }
    }

    /// Store a freshly issued token (login)
    pub fn save(&self, token: &str) {
        self.storage.write(TOKEN_STORAGE_KEY, token);
    }

    /// Get the current token, if any
    ///
    /// No shape validation happens here; only presence matters.
    pub fn get(&self) -> Option<String> {
        self.storage.read(TOKEN_STORAGE_KEY)
    }

    /// Drop the stored token (logout). Clearing an empty store is a
    /// no-op.
    pub fn clear(&self) {
        self.storage.remove(TOKEN_STORAGE_KEY);
    }

    /// Whether a token is present
    pub fn is_authenticated(&self) -> bool {
        self.get().is_some()
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_and_get() {
        let session = SessionStore::new();
        assert_eq!(session.get(), None);

        session.save("abc123");
        assert_eq!(session.get(), Some("abc123".to_string()));
        assert!(session.is_authenticated());
    }

    #[test]
    fn test_clear_removes_token() {
        let session = SessionStore::new();
        session.save("abc123");
        session.clear();

        assert_eq!(session.get(), None);
        assert!(!session.is_authenticated());
    }

    #[test]
    fn test_clear_is_idempotent() {
        let session = SessionStore::new();

        // Clearing an empty store is a no-op
        session.clear();
        assert_eq!(session.get(), None);

        session.save("abc123");
        session.clear();
        session.clear();
        assert_eq!(session.get(), None);
    }

    #[test]
    fn test_no_validation_on_read() {
        let session = SessionStore::new();

        // The store is a cache, not a trust boundary: any string is
        // held as-is
        session.save("not-even-close-to-a-jwt");
        assert_eq!(session.get(), Some("not-even-close-to-a-jwt".to_string()));
    }

    #[test]
    fn test_clones_share_state() {
        let session = SessionStore::new();
        let other = session.clone();

        session.save("abc123");
        assert_eq!(other.get(), Some("abc123".to_string()));

        other.clear();
        assert_eq!(session.get(), None);
    }

    #[test]
    fn test_concurrent_read_and_clear() {
        let session = SessionStore::new();
        session.save("abc123");

        let reader = session.clone();
        let handle = std::thread::spawn(move || {
            // Either the old token or nothing; never a torn value
            match reader.get() {
                Some(token) => assert_eq!(token, "abc123"),
                None => {}
            }
        });

        session.clear();
        handle.join().unwrap();
    }
}
