//! # Credential store: durable key/value slot for the session trio
//!
//! The client keeps exactly three entries in durable storage so that a reload
//! can rehydrate the session without asking the user to log in again:
//!
//! | Key | Value |
//! |-----|-------|
//! | [`ACCESS_TOKEN_KEY`] (`"accessToken"`) | bearer token attached to every API call |
//! | [`REFRESH_TOKEN_KEY`] (`"refreshToken"`) | long-lived token, exchanged only on explicit refresh |
//! | [`USER_KEY`] (`"user"`) | the current [`User`] serialised as JSON |
//!
//! ## [`CredentialStore`] trait
//!
//! Backends only implement raw string access (`get`/`set`/`remove`). The
//! batch methods `set_many`/`remove_many` default to a loop, and backends that
//! can write several keys in one step (a single lock, a single file write)
//! override them so the trio is written or cleared together.
//!
//! Everything session-shaped (`save_session`, `clear`, `user`, ...) is a
//! provided method built on top of those primitives. Implementations live in
//! sibling modules ([`crate::memory`], [`crate::file_store`] and, on the web,
//! `crate::local_storage`).

use crate::models::{AuthTokens, User};

pub const ACCESS_TOKEN_KEY: &str = "accessToken";
pub const REFRESH_TOKEN_KEY: &str = "refreshToken";
pub const USER_KEY: &str = "user";

/// Every key owned by the session, in write order.
pub const SESSION_KEYS: [&str; 3] = [ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY, USER_KEY];

/// Durable string storage for tokens and the cached user.
pub trait CredentialStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);

    fn set_many(&self, entries: &[(&str, String)]) {
        for (key, value) in entries {
            self.set(key, value);
        }
    }

    fn remove_many(&self, keys: &[&str]) {
        for key in keys {
            self.remove(key);
        }
    }

    /// Current bearer token, if any. Blank values count as absent.
    fn access_token(&self) -> Option<String> {
        self.get(ACCESS_TOKEN_KEY).filter(|t| !t.trim().is_empty())
    }

    fn refresh_token(&self) -> Option<String> {
        self.get(REFRESH_TOKEN_KEY).filter(|t| !t.trim().is_empty())
    }

    /// Cached user. An entry that no longer decodes is treated as missing.
    fn user(&self) -> Option<User> {
        let raw = self.get(USER_KEY)?;
        match serde_json::from_str(&raw) {
            Ok(user) => Some(user),
            Err(e) => {
                tracing::warn!("Discarding unreadable cached user: {}", e);
                None
            }
        }
    }

    /// Persist the whole trio in one batch.
    fn save_session(&self, tokens: &AuthTokens, user: &User) {
        let Ok(user_json) = serde_json::to_string(user) else {
            return;
        };
        let mut entries = vec![(ACCESS_TOKEN_KEY, tokens.access_token.clone())];
        if let Some(refresh) = &tokens.refresh_token {
            entries.push((REFRESH_TOKEN_KEY, refresh.clone()));
        }
        entries.push((USER_KEY, user_json));
        if tokens.refresh_token.is_none() {
            self.remove(REFRESH_TOKEN_KEY);
        }
        self.set_many(&entries);
    }

    /// Persist tokens only (OAuth callback, before the user is known).
    fn save_tokens(&self, tokens: &AuthTokens) {
        let mut entries = vec![(ACCESS_TOKEN_KEY, tokens.access_token.clone())];
        if let Some(refresh) = &tokens.refresh_token {
            entries.push((REFRESH_TOKEN_KEY, refresh.clone()));
        }
        self.set_many(&entries);
    }

    fn save_user(&self, user: &User) {
        if let Ok(json) = serde_json::to_string(user) {
            self.set(USER_KEY, &json);
        }
    }

    /// Remove every session key. Safe on an empty store.
    fn clear(&self) {
        self.remove_many(&SESSION_KEYS);
    }
}
