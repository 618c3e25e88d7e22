use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::credentials::CredentialStore;

/// In-memory CredentialStore for testing and as a fallback when no durable
/// storage is reachable.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys currently held.
    pub fn len(&self) -> usize {
        self.entries.lock().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl CredentialStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.lock().ok()?.get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.insert(key.to_string(), value.to_string());
        }
    }

    fn remove(&self, key: &str) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.remove(key);
        }
    }

    fn set_many(&self, batch: &[(&str, String)]) {
        if let Ok(mut entries) = self.entries.lock() {
            for (key, value) in batch {
                entries.insert(key.to_string(), value.clone());
            }
        }
    }

    fn remove_many(&self, keys: &[&str]) {
        if let Ok(mut entries) = self.entries.lock() {
            for key in keys {
                entries.remove(*key);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::credentials::{ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY, USER_KEY};
    use crate::models::{AuthTokens, User};

    fn alice() -> User {
        User {
            id: 1,
            username: "alice".to_string(),
            full_name: Some("Alice Liddell".to_string()),
            bio: None,
            profile_image_url: None,
            email: "alice@example.com".to_string(),
        }
    }

    fn tokens() -> AuthTokens {
        AuthTokens {
            access_token: "access-1".to_string(),
            refresh_token: Some("refresh-1".to_string()),
        }
    }

    #[test]
    fn test_save_session_writes_trio() {
        let store = MemoryStore::new();
        store.save_session(&tokens(), &alice());

        assert_eq!(store.len(), 3);
        assert_eq!(store.access_token().as_deref(), Some("access-1"));
        assert_eq!(store.refresh_token().as_deref(), Some("refresh-1"));
        assert_eq!(store.user(), Some(alice()));
    }

    #[test]
    fn test_clear_removes_every_key() {
        let store = MemoryStore::new();
        store.save_session(&tokens(), &alice());
        store.clear();

        assert!(store.is_empty());
        assert!(store.get(ACCESS_TOKEN_KEY).is_none());
        assert!(store.get(REFRESH_TOKEN_KEY).is_none());
        assert!(store.get(USER_KEY).is_none());
    }

    #[test]
    fn test_clear_on_empty_store() {
        let store = MemoryStore::new();
        store.clear();
        assert!(store.is_empty());
    }

    #[test]
    fn test_corrupted_user_reads_as_absent() {
        let store = MemoryStore::new();
        store.set(USER_KEY, "{not json");
        assert!(store.user().is_none());
    }

    #[test]
    fn test_blank_token_reads_as_absent() {
        let store = MemoryStore::new();
        store.set(ACCESS_TOKEN_KEY, "   ");
        assert!(store.access_token().is_none());
    }

    #[test]
    fn test_clones_share_entries() {
        let store = MemoryStore::new();
        let other = store.clone();
        store.save_user(&alice());
        assert_eq!(other.user(), Some(alice()));
    }

    #[test]
    fn test_session_without_refresh_token_drops_stale_one() {
        let store = MemoryStore::new();
        store.set(REFRESH_TOKEN_KEY, "old");
        let tokens = AuthTokens {
            access_token: "access-2".to_string(),
            refresh_token: None,
        };
        store.save_session(&tokens, &alice());
        assert!(store.refresh_token().is_none());
        assert_eq!(store.access_token().as_deref(), Some("access-2"));
    }
}
