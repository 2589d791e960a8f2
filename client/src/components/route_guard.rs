//! Route wrappers enforcing the auth boundary.
//!
//! Both wrappers render exactly one of placeholder, redirect or children for
//! the current session snapshot; see [`guard_decision`].

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::components::Redirect;

use crate::state::auth::use_auth;
use crate::util::auth::{GuardDecision, RouteAccess, guard_decision};

/// Render `children` only for a signed-in user.
#[component]
pub fn ProtectedRoute(children: ChildrenFn) -> impl IntoView {
    guarded(RouteAccess::Protected, children)
}

/// Render `children` only for a signed-out user.
#[component]
pub fn PublicRoute(children: ChildrenFn) -> impl IntoView {
    guarded(RouteAccess::PublicOnly, children)
}

fn guarded(access: RouteAccess, children: ChildrenFn) -> impl IntoView {
    let auth = use_auth();
    // Memoized so login-error state changes don't remount the children.
    let decision = Memo::new(move |_| guard_decision(access, &auth.get()));

    move || match decision.get() {
        GuardDecision::Placeholder => view! {
            <div class="route-placeholder" aria-busy="true">
                <div class="spinner"></div>
            </div>
        }
        .into_any(),
        GuardDecision::Redirect(path) => {
            let options = NavigateOptions { replace: true, ..NavigateOptions::default() };
            view! { <Redirect path=path options=options/> }.into_any()
        }
        GuardDecision::Render => children().into_any(),
    }
}
