//! Sign-in page: email + password against the configured auth backend.
//!
//! SYSTEM CONTEXT
//! ==============
//! Mounted behind `PublicRoute`. A successful login flips the session to
//! authenticated and the guard redirects to `/`; failures stay on the page
//! with the backend message inline.

#[cfg(test)]
#[path = "signin_test.rs"]
mod signin_test;

use leptos::prelude::*;

use crate::net::types::LoginCredentials;
use crate::state::auth::use_session;

/// Check the form before any request is made.
///
/// # Errors
///
/// The message to show inline when a field is missing or malformed.
pub fn validate_credentials(email: &str, password: &str) -> Result<LoginCredentials, &'static str> {
    let email = email.trim();
    if email.is_empty() {
        return Err("Email is required");
    }
    if !email.contains('@') {
        return Err("Enter a valid email address");
    }
    if password.is_empty() {
        return Err("Password is required");
    }
    Ok(LoginCredentials { email: email.to_owned(), password: password.to_owned() })
}

pub fn submit_label(busy: bool) -> &'static str {
    if busy { "Signing in..." } else { "Sign In" }
}

#[component]
pub fn SignInPage() -> impl IntoView {
    let session = use_session();
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let error = RwSignal::new(None::<String>);
    let busy = RwSignal::new(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get_untracked() {
            return;
        }
        error.set(None);
        let credentials = match validate_credentials(&email.get_untracked(), &password.get_untracked()) {
            Ok(credentials) => credentials,
            Err(message) => {
                error.set(Some(message.to_owned()));
                return;
            }
        };
        busy.set(true);
        let session = session.clone();
        leptos::task::spawn_local(async move {
            if let Err(e) = session.login(&credentials).await {
                error.set(Some(e.message()));
            }
            busy.set(false);
        });
    };

    view! {
        <div class="signin-page">
            <div class="signin-page__inner">
                <a href="/" class="brand brand--center">
                    <span class="brand__mark">"B"</span>
                    <span>"rutalism"</span>
                </a>
                <div class="card signin-card">
                    <div class="signin-card__header">
                        <h2>"Welcome Back"</h2>
                        <p class="muted">"Enter your credentials to access your account"</p>
                    </div>
                    <form class="signin-form" on:submit=on_submit>
                        <Show when=move || error.get().is_some()>
                            <div class="alert alert--error" role="alert">{move || error.get().unwrap_or_default()}</div>
                        </Show>
                        <label for="email">"Email"</label>
                        <input
                            id="email"
                            class="input"
                            type="email"
                            placeholder="sarah.johnson@techcorp.com"
                            required
                            prop:value=move || email.get()
                            on:input=move |ev| email.set(event_target_value(&ev))
                            disabled=move || busy.get()
                        />
                        <label for="password">"Password"</label>
                        <input
                            id="password"
                            class="input"
                            type="password"
                            placeholder="SecurePass123!"
                            required
                            prop:value=move || password.get()
                            on:input=move |ev| password.set(event_target_value(&ev))
                            disabled=move || busy.get()
                        />
                        <button class="button button--block" type="submit" disabled=move || busy.get()>
                            {move || submit_label(busy.get())}
                        </button>
                    </form>
                </div>
            </div>
        </div>
    }
}
