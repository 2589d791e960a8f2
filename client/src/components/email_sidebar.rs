//! Mailbox view navigation with badge counts.

#[cfg(test)]
#[path = "email_sidebar_test.rs"]
mod email_sidebar_test;

use leptos::prelude::*;

use crate::net::types::{EmailCounts, EmailView};
use crate::state::auth::use_auth;

const LABELS: [&str; 4] = ["Work", "Family", "Friends", "Office"];

/// Badge for `view`: only shown for positive counts. Trash never has one.
pub fn badge_count(view: EmailView, counts: Option<&EmailCounts>) -> Option<u32> {
    counts.and_then(|c| view.count_in(c)).filter(|n| *n > 0)
}

#[component]
pub fn EmailSidebar(
    #[prop(into)] current_view: Signal<EmailView>,
    #[prop(into)] counts: Signal<Option<EmailCounts>>,
    on_view_change: Callback<EmailView>,
) -> impl IntoView {
    let auth = use_auth();
    let user_name = move || auth.get().user.map_or_else(|| "User".to_owned(), |u| u.name);

    view! {
        <aside class="email-sidebar">
            <div class="email-sidebar__profile">
                <p class="strong">{user_name}</p>
                <p class="muted">"Web developer"</p>
            </div>
            <button class="button button--block" type="button">"Compose"</button>
            <nav class="email-sidebar__nav">
                {EmailView::ALL
                    .iter()
                    .map(|view| {
                        let view = *view;
                        view! {
                            <button
                                type="button"
                                class="email-sidebar__item"
                                class:email-sidebar__item--active=move || current_view.get() == view
                                on:click=move |_| on_view_change.run(view)
                            >
                                <span>{view.label()}</span>
                                {move || {
                                    badge_count(view, counts.get().as_ref())
                                        .map(|n| view! { <span class="badge">{n}</span> })
                                }}
                            </button>
                        }
                    })
                    .collect_view()}
            </nav>
            <div class="email-sidebar__labels">
                <h3>"Labels"</h3>
                {LABELS.iter().map(|label| view! { <span class="email-sidebar__label">{*label}</span> }).collect_view()}
            </div>
        </aside>
    }
}
