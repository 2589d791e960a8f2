//! Cached email queries and the star mutation.
//!
//! SYSTEM CONTEXT
//! ==============
//! [`EmailStore`] sits between the email page and [`EmailService`]. Reads go
//! through per-key caches (list entries keyed by the full filter value, one
//! counts entry); toggling a star invalidates every list entry and the counts
//! instead of patching them, trading a visible round-trip for agreement with
//! the server.
//!
//! The `use_*` hooks wrap the store in `LocalResource`s that also read a
//! query epoch signal, so bumping the epoch after an invalidation makes every
//! mounted query refetch.

#[cfg(test)]
#[path = "emails_test.rs"]
mod emails_test;

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use leptos::prelude::*;

use super::query::QueryCache;
use crate::config::QueryTimings;
use crate::error::ApiError;
use crate::net::email_api::EmailService;
use crate::net::types::{Email, EmailCounts, EmailFilters, EmailListResponse};
use crate::util::time::now_millis;

type Clock = Arc<dyn Fn() -> u64 + Send + Sync>;

struct Caches {
    lists: QueryCache<EmailFilters, EmailListResponse>,
    counts: QueryCache<(), EmailCounts>,
}

#[derive(Clone)]
pub struct EmailStore {
    service: EmailService,
    caches: Arc<Mutex<Caches>>,
    read_retries: u32,
    clock: Clock,
}

impl EmailStore {
    pub fn new(service: EmailService, timings: QueryTimings) -> Self {
        Self::with_clock(service, timings, Arc::new(now_millis))
    }

    /// Store reading time from `clock` (milliseconds).
    pub fn with_clock(service: EmailService, timings: QueryTimings, clock: Clock) -> Self {
        let caches = Caches {
            lists: QueryCache::new(timings.list_stale_ms, timings.gc_ms),
            counts: QueryCache::new(timings.counts_stale_ms, timings.gc_ms),
        };
        Self { service, caches: Arc::new(Mutex::new(caches)), read_retries: timings.read_retries, clock }
    }

    fn lock(&self) -> MutexGuard<'_, Caches> {
        self.caches.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn now(&self) -> u64 {
        (self.clock)()
    }

    async fn with_retry<T, F, Fut>(&self, what: &str, mut op: F) -> Result<T, ApiError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, ApiError>>,
    {
        let mut attempt = 0;
        loop {
            match op().await {
                Ok(value) => return Ok(value),
                Err(e) if attempt < self.read_retries && e.is_retryable() => {
                    attempt += 1;
                    log::warn!("{what} failed, retrying ({attempt}/{}): {e}", self.read_retries);
                }
                Err(e) => return Err(e),
            }
        }
    }

    /// One page of emails, served from cache while fresh.
    ///
    /// # Errors
    ///
    /// The last error from [`EmailService::get_emails`] after retries.
    pub async fn emails(&self, filters: &EmailFilters) -> Result<EmailListResponse, ApiError> {
        let ticket = {
            let mut caches = self.lock();
            if let Some(hit) = caches.lists.fresh(filters, self.now()) {
                return Ok(hit);
            }
            caches.lists.begin(filters)
        };
        let result = self.with_retry("email list", || self.service.get_emails(filters)).await;
        let mut caches = self.lock();
        match &result {
            Ok(page) => {
                caches.lists.complete(filters, ticket, page.clone(), self.now());
            }
            Err(_) => caches.lists.abandon(filters, ticket),
        }
        result
    }

    /// Sidebar counts, served from cache while fresh.
    ///
    /// # Errors
    ///
    /// The last error from [`EmailService::get_email_counts`] after retries.
    pub async fn counts(&self) -> Result<EmailCounts, ApiError> {
        let ticket = {
            let mut caches = self.lock();
            if let Some(hit) = caches.counts.fresh(&(), self.now()) {
                return Ok(hit);
            }
            caches.counts.begin(&())
        };
        let result = self.with_retry("email counts", || self.service.get_email_counts()).await;
        let mut caches = self.lock();
        match &result {
            Ok(counts) => {
                caches.counts.complete(&(), ticket, *counts, self.now());
            }
            Err(_) => caches.counts.abandon(&(), ticket),
        }
        result
    }

    /// Toggle the star on `email_id`. Not retried. On success every list
    /// entry and the counts entry are invalidated.
    ///
    /// # Errors
    ///
    /// The error from [`EmailService::toggle_star`]; caches are untouched.
    pub async fn toggle_star(&self, email_id: &str) -> Result<Email, ApiError> {
        let email = self.service.toggle_star(email_id).await?;
        let mut caches = self.lock();
        caches.lists.invalidate_all();
        caches.counts.invalidate_all();
        Ok(email)
    }

    /// Mark one list entry stale (manual refresh).
    pub fn invalidate_list(&self, filters: &EmailFilters) {
        self.lock().lists.invalidate(filters);
    }

    /// Last page stored for `filters`, fresh or not.
    pub fn cached_emails(&self, filters: &EmailFilters) -> Option<EmailListResponse> {
        self.lock().lists.peek(filters)
    }

    pub fn cached_counts(&self) -> Option<EmailCounts> {
        self.lock().counts.peek(&())
    }
}

// =============================================================
// Leptos hooks
// =============================================================

/// Counter read by every query resource; bumping it refetches them.
#[derive(Clone, Copy, Debug)]
pub struct QueryEpoch(RwSignal<u64>);

impl QueryEpoch {
    pub fn bump(self) {
        self.0.update(|n| *n += 1);
    }

    fn track(self) {
        self.0.track();
    }
}

pub fn provide_email_store(store: EmailStore) {
    provide_context(store);
    provide_context(QueryEpoch(RwSignal::new(0)));
}

fn use_email_store() -> (EmailStore, QueryEpoch) {
    let store = expect_context::<EmailStore>();
    let epoch = expect_context::<QueryEpoch>();
    (store, epoch)
}

/// Email list for the current `filters`, refetched when they change.
pub fn use_emails(filters: Signal<EmailFilters>) -> LocalResource<Result<EmailListResponse, ApiError>> {
    let (store, epoch) = use_email_store();
    LocalResource::new(move || {
        let filters = filters.get();
        epoch.track();
        let store = store.clone();
        async move { store.emails(&filters).await }
    })
}

pub fn use_email_counts() -> LocalResource<Result<EmailCounts, ApiError>> {
    let (store, epoch) = use_email_store();
    LocalResource::new(move || {
        epoch.track();
        let store = store.clone();
        async move { store.counts().await }
    })
}

/// Force the list for `filters` to refetch.
pub fn use_refresh_emails() -> Callback<EmailFilters> {
    let (store, epoch) = use_email_store();
    Callback::new(move |filters: EmailFilters| {
        store.invalidate_list(&filters);
        epoch.bump();
    })
}

/// Star mutation state.
#[derive(Clone, Copy)]
pub struct ToggleStar {
    /// Email currently being toggled.
    pub pending: RwSignal<Option<String>>,
    /// Message of the last failure.
    pub error: RwSignal<Option<String>>,
    run: Callback<String>,
}

impl ToggleStar {
    pub fn toggle(&self, email_id: String) {
        self.run.run(email_id);
    }
}

pub fn use_toggle_star() -> ToggleStar {
    let (store, epoch) = use_email_store();
    let pending = RwSignal::new(None::<String>);
    let error = RwSignal::new(None::<String>);
    let run = Callback::new(move |email_id: String| {
        let store = store.clone();
        pending.set(Some(email_id.clone()));
        error.set(None);
        leptos::task::spawn_local(async move {
            match store.toggle_star(&email_id).await {
                Ok(_) => epoch.bump(),
                Err(e) => {
                    log::error!("failed to star email {email_id}: {e}");
                    error.set(Some(e.message()));
                }
            }
            pending.set(None);
        });
    });
    ToggleStar { pending, error, run }
}
