//! Shared client-side state modules.
//!
//! DESIGN
//! ======
//! `auth` owns the session lifecycle; `emails` owns cached email queries on
//! top of the generic keyed cache in `query`. Pages read both through Leptos
//! context.

pub mod auth;
pub mod emails;
pub mod query;
