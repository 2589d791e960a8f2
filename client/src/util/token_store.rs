//! Persisted auth token and user record.
//!
//! SYSTEM CONTEXT
//! ==============
//! Survives page reloads so the session can start optimistically before
//! validation finishes. Every read degrades to `None` on bad data: a corrupt
//! stored user must never take the app down.

#[cfg(test)]
#[path = "token_store_test.rs"]
mod token_store_test;

use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;

use super::storage::KeyValueStore;

pub const TOKEN_KEY: &str = "auth_token";
pub const USER_KEY: &str = "auth_user";

#[derive(Clone)]
pub struct TokenStore {
    store: Arc<dyn KeyValueStore>,
}

impl TokenStore {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    pub fn get_token(&self) -> Option<String> {
        self.store.get(TOKEN_KEY).filter(|t| !t.is_empty())
    }

    pub fn set_token(&self, token: &str) {
        self.store.set(TOKEN_KEY, token);
    }

    pub fn remove_token(&self) {
        self.store.remove(TOKEN_KEY);
    }

    /// Stored user, or `None` when absent or not valid JSON for `T`.
    pub fn get_user<T: DeserializeOwned>(&self) -> Option<T> {
        let raw = self.store.get(USER_KEY)?;
        match serde_json::from_str(&raw) {
            Ok(user) => Some(user),
            Err(e) => {
                log::debug!("ignoring malformed stored user: {e}");
                None
            }
        }
    }

    pub fn set_user<T: Serialize>(&self, user: &T) {
        match serde_json::to_string(user) {
            Ok(raw) => self.store.set(USER_KEY, &raw),
            Err(e) => log::warn!("failed to serialize user for storage: {e}"),
        }
    }

    pub fn remove_user(&self) {
        self.store.remove(USER_KEY);
    }

    /// Remove token then user.
    pub fn clear_auth(&self) {
        self.remove_token();
        self.remove_user();
    }

    pub fn is_authenticated(&self) -> bool {
        self.get_token().is_some()
    }
}

impl std::fmt::Debug for TokenStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenStore").field("has_token", &self.is_authenticated()).finish()
    }
}
