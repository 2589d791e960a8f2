//! Authenticated application shell: sidebar navigation, header, footer.
//!
//! DESIGN
//! ======
//! Sign-out goes through the session so every subscriber (route guards
//! included) sees the signed-out snapshot; the guard around the shell then
//! redirects to `/signin`.

#[cfg(test)]
#[path = "layout_test.rs"]
mod layout_test;

use leptos::prelude::*;
use leptos_router::hooks::use_location;

use crate::state::auth::{use_auth, use_session};
use crate::util::time::{now_ms, year_at};

/// Sidebar entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NavItem {
    pub label: &'static str,
    pub href: &'static str,
}

pub const NAV_ITEMS: [NavItem; 2] =
    [NavItem { label: "Marketing", href: "/" }, NavItem { label: "Email", href: "/apps/email" }];

pub fn is_active(item: &NavItem, pathname: &str) -> bool {
    item.href == pathname
}

/// Single-letter avatar fallback.
pub fn initial(name: &str) -> String {
    name.trim().chars().next().map_or_else(|| "U".to_owned(), |c| c.to_uppercase().collect())
}

#[component]
pub fn Layout(children: Children) -> impl IntoView {
    let session = use_session();
    let auth = use_auth();
    let location = use_location();
    let signing_out = RwSignal::new(false);

    let on_sign_out = move |_| {
        if signing_out.get_untracked() {
            return;
        }
        signing_out.set(true);
        let session = session.clone();
        leptos::task::spawn_local(async move {
            session.logout().await;
            signing_out.set(false);
        });
    };

    let user_name = move || auth.get().user.map_or_else(|| "User".to_owned(), |u| u.name);
    let avatar = move || auth.get().user.and_then(|u| u.avatar);

    view! {
        <div class="app-shell">
            <aside class="app-sidebar">
                <a href="/" class="brand">
                    <span class="brand__mark">"B"</span>
                    <span>"rutalism"</span>
                </a>
                <nav class="app-sidebar__nav">
                    {NAV_ITEMS
                        .iter()
                        .map(|item| {
                            let item = *item;
                            view! {
                                <a
                                    href=item.href
                                    class="app-sidebar__link"
                                    class:app-sidebar__link--active=move || is_active(&item, &location.pathname.get())
                                >
                                    {item.label}
                                </a>
                            }
                        })
                        .collect_view()}
                </nav>
            </aside>
            <div class="app-main">
                <header class="app-header">
                    <span class="app-header__user">{user_name}</span>
                    <div class="avatar">
                        {move || match avatar() {
                            Some(src) => view! { <img src=src alt="avatar"/> }.into_any(),
                            None => view! { <span>{move || initial(&user_name())}</span> }.into_any(),
                        }}
                    </div>
                    <button class="button" on:click=on_sign_out disabled=move || signing_out.get()>
                        "Logout"
                    </button>
                </header>
                <main class="app-content">{children()}</main>
                <footer class="app-footer">
                    <p>{format!("Copyright \u{a9} {}", year_at(now_ms()))}</p>
                </footer>
            </div>
        </div>
    }
}
