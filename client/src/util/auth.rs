//! Route-guard decisions.
//!
//! SYSTEM CONTEXT
//! ==============
//! Protected and public-only routes share one pure decision over a single
//! session snapshot. Nothing redirects while the session is still loading,
//! which keeps a stored-but-unvalidated session from bouncing through
//! `/signin` on reload.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use crate::state::auth::AuthState;

pub const SIGN_IN_PATH: &str = "/signin";
pub const HOME_PATH: &str = "/";

/// Which side of the auth boundary a route lives on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RouteAccess {
    /// Requires a signed-in user.
    Protected,
    /// Only for signed-out users (e.g. the sign-in page).
    PublicOnly,
}

/// Outcome of guarding one render.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GuardDecision {
    /// Session still loading; render a skeleton and decide later.
    Placeholder,
    /// Navigate away (replacing history).
    Redirect(&'static str),
    /// Render the guarded children.
    Render,
}

pub fn guard_decision(access: RouteAccess, state: &AuthState) -> GuardDecision {
    if state.is_loading {
        return GuardDecision::Placeholder;
    }
    match (access, state.is_authenticated) {
        (RouteAccess::Protected, false) => GuardDecision::Redirect(SIGN_IN_PATH),
        (RouteAccess::PublicOnly, true) => GuardDecision::Redirect(HOME_PATH),
        _ => GuardDecision::Render,
    }
}
