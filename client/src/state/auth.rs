//! Auth-session state for the current browser tab.
//!
//! SYSTEM CONTEXT
//! ==============
//! [`Session`] is the single source of truth for who is signed in. It is an
//! explicitly constructed handle (not a global): the root component builds
//! one, mirrors it into an `RwSignal<AuthState>` through `subscribe`, and
//! provides both as context for route guards and pages.
//!
//! State changes are whole-value replacements, so a listener never observes
//! a half-updated session.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use std::sync::{Arc, Mutex, PoisonError};

use leptos::prelude::*;

use crate::error::ApiError;
use crate::net::auth_api::AuthService;
use crate::net::types::{LoginCredentials, User};

/// Snapshot of the session.
///
/// Once `is_loading` is false, `is_authenticated == user.is_some()`. While
/// loading, the fields hold the optimistic values read from storage.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AuthState {
    pub user: Option<User>,
    pub is_authenticated: bool,
    pub is_loading: bool,
}

/// Coarse lifecycle phase derived from an [`AuthState`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionPhase {
    Initializing,
    Authenticated,
    Unauthenticated,
}

impl AuthState {
    /// Optimistic pre-validation state built from storage.
    pub fn initializing(user: Option<User>, has_token: bool) -> Self {
        Self { user, is_authenticated: has_token, is_loading: true }
    }

    pub fn authenticated(user: User) -> Self {
        Self { user: Some(user), is_authenticated: true, is_loading: false }
    }

    pub fn unauthenticated() -> Self {
        Self { user: None, is_authenticated: false, is_loading: false }
    }

    pub fn phase(&self) -> SessionPhase {
        match (self.is_loading, self.is_authenticated) {
            (true, _) => SessionPhase::Initializing,
            (false, true) => SessionPhase::Authenticated,
            (false, false) => SessionPhase::Unauthenticated,
        }
    }
}

type Listener = Arc<dyn Fn(&AuthState) + Send + Sync>;

/// Handle returned by [`Session::subscribe`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Subscription(u64);

struct Inner {
    state: AuthState,
    listeners: Vec<(u64, Listener)>,
    next_id: u64,
}

/// Shared session handle. Clones observe and mutate the same session.
#[derive(Clone)]
pub struct Session {
    service: AuthService,
    inner: Arc<Mutex<Inner>>,
}

impl Session {
    /// Start in the initializing phase from synchronous storage reads.
    pub fn new(service: AuthService) -> Self {
        let state = AuthState::initializing(service.stored_user(), service.stored_token().is_some());
        Self { service, inner: Arc::new(Mutex::new(Inner { state, listeners: Vec::new(), next_id: 0 })) }
    }

    pub fn service(&self) -> &AuthService {
        &self.service
    }

    pub fn snapshot(&self) -> AuthState {
        self.lock().state.clone()
    }

    /// Register `listener` for every future state replacement.
    pub fn subscribe(&self, listener: impl Fn(&AuthState) + Send + Sync + 'static) -> Subscription {
        let mut inner = self.lock();
        let id = inner.next_id;
        inner.next_id += 1;
        inner.listeners.push((id, Arc::new(listener)));
        Subscription(id)
    }

    pub fn unsubscribe(&self, subscription: Subscription) {
        self.lock().listeners.retain(|(id, _)| *id != subscription.0);
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn replace(&self, next: AuthState) {
        let listeners: Vec<Listener> = {
            let mut inner = self.lock();
            inner.state = next.clone();
            inner.listeners.iter().map(|(_, l)| Arc::clone(l)).collect()
        };
        // Listeners run without the lock so they may read the session.
        for listener in listeners {
            listener(&next);
        }
    }

    /// Resolve the initializing phase against the auth service.
    ///
    /// Validation failures are logged and treated as signed out; they never
    /// propagate.
    pub async fn validate(&self) -> AuthState {
        let next = match self.service.validate_token().await {
            Ok(Some(user)) => AuthState::authenticated(user),
            Ok(None) => AuthState::unauthenticated(),
            Err(e) => {
                log::error!("auth validation error: {e}");
                AuthState::unauthenticated()
            }
        };
        self.replace(next.clone());
        next
    }

    /// Sign in.
    ///
    /// On failure only `is_loading` is reset; `user` and `is_authenticated`
    /// keep their previous values and the error is returned for display.
    ///
    /// # Errors
    ///
    /// Returns the auth service error unchanged.
    pub async fn login(&self, credentials: &LoginCredentials) -> Result<User, ApiError> {
        match self.service.login(credentials).await {
            Ok(response) => {
                self.replace(AuthState::authenticated(response.user.clone()));
                Ok(response.user)
            }
            Err(e) => {
                let mut next = self.snapshot();
                next.is_loading = false;
                self.replace(next);
                Err(e)
            }
        }
    }

    /// Sign out. Always ends unauthenticated.
    pub async fn logout(&self) {
        self.service.logout().await;
        self.replace(AuthState::unauthenticated());
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session").field("state", &self.snapshot()).finish_non_exhaustive()
    }
}

// =============================================================
// Leptos context
// =============================================================

/// Provide `session` and a signal mirroring it to the component tree.
pub fn provide_session(session: Session) -> RwSignal<AuthState> {
    let auth = RwSignal::new(session.snapshot());
    let subscription = session.subscribe(move |state| auth.set(state.clone()));
    let unsubscribe_from = session.clone();
    on_cleanup(move || unsubscribe_from.unsubscribe(subscription));
    provide_context(session);
    provide_context(auth);
    auth
}

/// The session handle. Panics outside the provider: reading defaults there
/// would silently show a signed-out UI.
pub fn use_session() -> Session {
    expect_context::<Session>()
}

/// Reactive session snapshot. Panics outside the provider.
pub fn use_auth() -> RwSignal<AuthState> {
    expect_context::<RwSignal<AuthState>>()
}
