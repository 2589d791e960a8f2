//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components render the authenticated shell, route guards and the widgets
//! shared by the dashboard and email pages, reading session and query state
//! from Leptos context providers.

pub mod email_sidebar;
pub mod layout;
pub mod route_guard;
pub mod stat_card;
