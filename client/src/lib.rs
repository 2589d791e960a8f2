//! # brutalism
//!
//! Leptos + WASM frontend for the Brutalism admin dashboard: session
//! management over a pluggable auth backend, route guards, and a cached
//! client for the email REST API.
//!
//! The same crate is compiled twice: with `hydrate` as the browser bundle and
//! with `ssr` as the page renderer linked into `brutalism-server`.

pub mod app;
pub mod components;
pub mod config;
pub mod error;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// Browser entry point.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
    leptos::mount::hydrate_body(app::App);
}
