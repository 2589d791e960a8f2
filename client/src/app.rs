//! Root application component with routing and context providers.

use std::sync::Arc;

use leptos::prelude::*;
use leptos_meta::{MetaTags, Stylesheet, Title, provide_meta_context};
use leptos_router::{
    StaticSegment,
    components::{Redirect, Route, Router, Routes},
};

use crate::components::layout::Layout;
use crate::components::route_guard::{ProtectedRoute, PublicRoute};
use crate::config::AppConfig;
use crate::net::auth_api::{AuthService, backend_for};
use crate::net::email_api::EmailService;
use crate::net::http::{GlooTransport, HttpTransport};
use crate::pages::{dashboard::DashboardPage, email::EmailPage, signin::SignInPage};
use crate::state::auth::{Session, provide_session};
use crate::state::emails::{EmailStore, provide_email_store};
use crate::util::storage::store_for;
use crate::util::token_store::TokenStore;

/// HTML shell rendered on the server for SSR + hydration.
pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

/// Root application component.
///
/// Wires config, storage, transport and services once, provides the session
/// and email store as context, and sets up client-side routing.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let config = AppConfig::from_build_env();
    let tokens = TokenStore::new(store_for(config.token_storage));
    let transport: Arc<dyn HttpTransport> = Arc::new(GlooTransport::new(config.request_timeout_ms));

    let auth_service = AuthService::new(backend_for(&config, transport.clone()), tokens.clone());
    let session = Session::new(auth_service);
    provide_session(session.clone());

    let email_service = EmailService::new(config.api_url.clone(), transport, tokens);
    provide_email_store(EmailStore::new(email_service, config.queries));

    // Effects only run in the browser, so validation never happens during SSR.
    Effect::new(move || {
        let session = session.clone();
        leptos::task::spawn_local(async move {
            session.validate().await;
        });
    });

    view! {
        <Stylesheet id="leptos" href="/pkg/brutalism.css"/>
        <Title text="Brutalism"/>

        <Router>
            <Routes fallback=|| view! { <Redirect path="/"/> }>
                <Route
                    path=StaticSegment("signin")
                    view=|| view! { <PublicRoute><SignInPage/></PublicRoute> }
                />
                <Route
                    path=StaticSegment("")
                    view=|| view! { <ProtectedRoute><Layout><DashboardPage/></Layout></ProtectedRoute> }
                />
                <Route
                    path=(StaticSegment("apps"), StaticSegment("email"))
                    view=|| view! { <ProtectedRoute><Layout><EmailPage/></Layout></ProtectedRoute> }
                />
            </Routes>
        </Router>
    }
}
