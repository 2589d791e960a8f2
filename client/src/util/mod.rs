//! Utility helpers shared across client UI modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Utility modules isolate browser/environment concerns (storage, cookies,
//! clock, timers) from page and component logic so the rules can be tested
//! natively.

pub mod auth;
pub mod debounce;
pub mod storage;
pub mod time;
pub mod token_store;
