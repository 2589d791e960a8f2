//! Key-value persistence strategies for browser state.
//!
//! SYSTEM CONTEXT
//! ==============
//! The token store is written against [`KeyValueStore`] so the same code runs
//! over `localStorage`, a cookie jar, or plain memory (SSR and tests).
//!
//! TRADE-OFFS
//! ==========
//! Browser storage is best-effort: quota errors, disabled storage and missing
//! `window` all degrade to "nothing stored" instead of failing outward.

#[cfg(test)]
#[path = "storage_test.rs"]
mod storage_test;

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use cookie::{Cookie, SameSite};
use time::{Duration, OffsetDateTime};

use crate::config::TokenStorageKind;

/// Lifetime of cookies written by [`CookieStore`].
pub const COOKIE_LIFETIME_DAYS: i64 = 2;

/// Synchronous string key-value storage.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

/// Pick the storage strategy for `kind`.
pub fn store_for(kind: TokenStorageKind) -> Arc<dyn KeyValueStore> {
    match kind {
        TokenStorageKind::Local => Arc::new(LocalStore),
        TokenStorageKind::Cookie => Arc::new(CookieStore),
        TokenStorageKind::Memory => Arc::new(MemoryStore::default()),
    }
}

/// In-process map.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner).get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_owned(), value.to_owned());
    }

    fn remove(&self, key: &str) {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner).remove(key);
    }
}

/// `window.localStorage`. Entries never expire.
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalStore;

#[cfg(feature = "hydrate")]
fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window().and_then(|w| w.local_storage().ok().flatten())
}

impl KeyValueStore for LocalStore {
    fn get(&self, key: &str) -> Option<String> {
        #[cfg(feature = "hydrate")]
        {
            local_storage()?.get_item(key).ok().flatten()
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = key;
            None
        }
    }

    fn set(&self, key: &str, value: &str) {
        #[cfg(feature = "hydrate")]
        {
            let Some(storage) = local_storage() else {
                return;
            };
            if storage.set_item(key, value).is_err() {
                log::debug!("localStorage write failed for {key}");
            }
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (key, value);
        }
    }

    fn remove(&self, key: &str) {
        #[cfg(feature = "hydrate")]
        {
            if let Some(storage) = local_storage() {
                let _ = storage.remove_item(key);
            }
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = key;
        }
    }
}

/// `document.cookie`, each entry expiring [`COOKIE_LIFETIME_DAYS`] after it
/// was written, `SameSite=Strict`.
#[derive(Debug, Default, Clone, Copy)]
pub struct CookieStore;

#[cfg(feature = "hydrate")]
fn html_document() -> Option<web_sys::HtmlDocument> {
    use wasm_bindgen::JsCast;
    web_sys::window()?.document()?.dyn_into::<web_sys::HtmlDocument>().ok()
}

#[cfg(feature = "hydrate")]
fn write_cookie(assignment: &str) {
    if let Some(doc) = html_document() {
        if doc.set_cookie(assignment).is_err() {
            log::debug!("cookie write rejected");
        }
    }
}

impl KeyValueStore for CookieStore {
    fn get(&self, key: &str) -> Option<String> {
        #[cfg(feature = "hydrate")]
        {
            let jar = html_document()?.cookie().ok()?;
            read_cookie(&jar, key)
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = key;
            None
        }
    }

    fn set(&self, key: &str, value: &str) {
        #[cfg(feature = "hydrate")]
        {
            let now = crate::util::time::now_ms();
            write_cookie(&cookie_assignment(key, value, now));
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (key, value);
        }
    }

    fn remove(&self, key: &str) {
        #[cfg(feature = "hydrate")]
        {
            write_cookie(&cookie_removal(key));
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = key;
        }
    }
}

fn expiry_from(now_ms: f64) -> OffsetDateTime {
    #[allow(clippy::cast_possible_truncation)]
    let secs = (now_ms / 1000.0).floor() as i64;
    OffsetDateTime::from_unix_timestamp(secs).unwrap_or(OffsetDateTime::UNIX_EPOCH) + Duration::days(COOKIE_LIFETIME_DAYS)
}

/// `document.cookie` assignment that stores `value` under `key`.
pub fn cookie_assignment(key: &str, value: &str, now_ms: f64) -> String {
    let cookie = Cookie::build((key, value))
        .path("/")
        .same_site(SameSite::Strict)
        .expires(expiry_from(now_ms))
        .build();
    cookie.encoded().to_string()
}

/// `document.cookie` assignment that deletes `key`.
pub fn cookie_removal(key: &str) -> String {
    let cookie = Cookie::build((key, ""))
        .path("/")
        .same_site(SameSite::Strict)
        .max_age(Duration::ZERO)
        .expires(OffsetDateTime::UNIX_EPOCH)
        .build();
    cookie.encoded().to_string()
}

/// Value of `key` in a `document.cookie` style jar (`a=1; b=2`).
pub fn read_cookie(jar: &str, key: &str) -> Option<String> {
    Cookie::split_parse_encoded(jar)
        .filter_map(Result::ok)
        .find(|c| c.name() == key)
        .map(|c| c.value().to_owned())
        .filter(|v| !v.is_empty())
}
