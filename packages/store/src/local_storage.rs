//! # Browser `localStorage` credential store
//!
//! [`LocalStorageStore`] is the [`CredentialStore`] used on the **web
//! platform**. It writes the session trio straight into `window.localStorage`
//! under the plain key names from [`crate::credentials`], so a page reload
//! can rehydrate the session before any network call.
//!
//! ## Error handling
//!
//! `localStorage` can be missing (privacy modes, sandboxed iframes) or throw
//! on quota errors. Reads then return `None` and writes are dropped after a
//! warning; the backend remains the source of truth and the user simply has
//! to log in again.

use web_sys::Storage;

use crate::credentials::CredentialStore;

/// `window.localStorage`-backed CredentialStore.
#[derive(Clone, Debug, Default)]
pub struct LocalStorageStore;

impl LocalStorageStore {
    pub fn new() -> Self {
        Self
    }

    fn storage(&self) -> Option<Storage> {
        web_sys::window()?.local_storage().ok().flatten()
    }
}

impl CredentialStore for LocalStorageStore {
    fn get(&self, key: &str) -> Option<String> {
        self.storage()?.get_item(key).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) {
        let Some(storage) = self.storage() else {
            tracing::warn!("localStorage unavailable, dropping {}", key);
            return;
        };
        if storage.set_item(key, value).is_err() {
            tracing::warn!("localStorage rejected write of {}", key);
        }
    }

    fn remove(&self, key: &str) {
        if let Some(storage) = self.storage() {
            let _ = storage.remove_item(key);
        }
    }
}
