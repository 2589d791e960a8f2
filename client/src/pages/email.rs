//! Email list page: mailbox views, debounced search and pagination.
//!
//! SYSTEM CONTEXT
//! ==============
//! The page derives one [`EmailFilters`] value from view, debounced search
//! and page; that value keys the list cache, so moving between pages or
//! views reuses fresh entries without a request. Starring goes through the
//! store mutation, which invalidates lists and counts and bumps the query
//! epoch.

#[cfg(test)]
#[path = "email_test.rs"]
mod email_test;

use leptos::prelude::*;

use crate::components::email_sidebar::EmailSidebar;
use crate::net::types::{Email, EmailFilters, EmailView, Pagination};
use crate::state::emails::{ToggleStar, use_email_counts, use_emails, use_refresh_emails, use_toggle_star};
use crate::util::debounce::use_debounced;
use crate::util::time::{format_email_time, now_ms};

pub const PAGE_LIMIT: u32 = 15;
pub const SEARCH_DEBOUNCE_MS: u32 = 500;

/// List filters for the current page state. An empty search is omitted.
pub fn build_filters(view: EmailView, search: &str, page: u32) -> EmailFilters {
    EmailFilters {
        view: Some(view),
        labels: None,
        search: (!search.is_empty()).then(|| search.to_owned()),
        page: Some(page),
        limit: Some(PAGE_LIMIT),
    }
}

/// `"16-30 of 42"`, or `"0-0 of 0"` for an empty result.
pub fn pagination_label(pagination: &Pagination) -> String {
    if pagination.total == 0 {
        return "0-0 of 0".to_owned();
    }
    let page = pagination.page.max(1);
    let start = (page - 1).saturating_mul(pagination.limit).saturating_add(1).min(pagination.total);
    let end = page.saturating_mul(pagination.limit).min(pagination.total);
    format!("{start}-{end} of {}", pagination.total)
}

pub fn can_go_prev(page: u32) -> bool {
    page > 1
}

pub fn can_go_next(page: u32, total_pages: u32) -> bool {
    page < total_pages
}

#[component]
pub fn EmailPage() -> impl IntoView {
    let view = RwSignal::new(EmailView::Inbox);
    let search = RwSignal::new(String::new());
    let page = RwSignal::new(1_u32);
    let debounced = use_debounced(search.into(), SEARCH_DEBOUNCE_MS);

    let filters = Memo::new(move |_| build_filters(view.get(), &debounced.get(), page.get()));
    let emails = use_emails(filters.into());
    let counts = use_email_counts();
    let refresh = use_refresh_emails();
    let toggle = use_toggle_star();

    let list = move || emails.get();
    let is_loading = move || list().is_none();
    let pagination = move || list().and_then(Result::ok).map(|r| r.pagination).unwrap_or_default();
    let counts_value = Signal::derive(move || counts.get().and_then(Result::ok));

    let on_view_change = Callback::new(move |next: EmailView| {
        view.set(next);
        page.set(1);
    });

    view! {
        <div class="email-page card">
            <EmailSidebar current_view=view counts=counts_value on_view_change=on_view_change/>
            <section class="email-page__main">
                <div class="email-page__header">
                    <h1>{move || view.get().label()}</h1>
                    <input
                        id="search"
                        class="input"
                        type="text"
                        placeholder="Search..."
                        prop:value=move || search.get()
                        on:input=move |ev| {
                            search.set(event_target_value(&ev));
                            page.set(1);
                        }
                    />
                </div>
                <div class="email-page__toolbar">
                    <button
                        type="button"
                        class="icon-button"
                        title="Refresh"
                        disabled=is_loading
                        on:click=move |_| refresh.run(filters.get_untracked())
                    >
                        "\u{21bb}"
                    </button>
                    <div class="email-page__pager">
                        <p>{move || pagination_label(&pagination())}</p>
                        <button
                            type="button"
                            class="icon-button"
                            title="Previous page"
                            disabled=move || !can_go_prev(page.get())
                            on:click=move |_| page.update(|p| *p = p.saturating_sub(1).max(1))
                        >
                            "\u{2039}"
                        </button>
                        <button
                            type="button"
                            class="icon-button"
                            title="Next page"
                            disabled=move || !can_go_next(page.get(), pagination().total_pages)
                            on:click=move |_| page.update(|p| *p += 1)
                        >
                            "\u{203a}"
                        </button>
                    </div>
                </div>
                <Show when=move || toggle.error.get().is_some()>
                    <div class="alert alert--error" role="alert">{move || toggle.error.get().unwrap_or_default()}</div>
                </Show>
                <div class="email-list">
                    {move || match list() {
                        None => view! { <div class="email-list__empty"><div class="spinner"></div></div> }.into_any(),
                        Some(Err(e)) => view! { <div class="email-list__empty"><p>{e.message()}</p></div> }.into_any(),
                        Some(Ok(response)) if response.data.is_empty() => {
                            view! { <div class="email-list__empty"><p>"No emails found"</p></div> }.into_any()
                        }
                        Some(Ok(response)) => response
                            .data
                            .into_iter()
                            .map(|email| view! { <EmailRow email=email toggle=toggle/> })
                            .collect_view()
                            .into_any(),
                    }}
                </div>
            </section>
        </div>
    }
}

#[component]
fn EmailRow(email: Email, toggle: ToggleStar) -> impl IntoView {
    let id = email.id.clone();
    let pending_id = id.clone();
    let unread = !email.is_read;
    let time = format_email_time(&email.timestamp, now_ms());

    view! {
        <div class="email-row" class:email-row--unread=unread>
            <input type="checkbox" class="email-row__select"/>
            <button
                type="button"
                class="email-row__star"
                class:email-row__star--on=email.is_starred
                title="Star"
                disabled=move || toggle.pending.get().as_deref() == Some(pending_id.as_str())
                on:click=move |ev| {
                    ev.stop_propagation();
                    toggle.toggle(id.clone());
                }
            >
                "\u{2605}"
            </button>
            <div class="email-row__content">
                <p class="email-row__subject">{email.subject}</p>
                <p class="email-row__body">{email.body}</p>
            </div>
            {email.has_attachments.then(|| view! { <span class="email-row__attachment" title="Has attachments">"\u{1f4ce}"</span> })}
            <p class="email-row__time">{time}</p>
        </div>
    }
}
