//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Each page owns route-scoped orchestration (form state, filters,
//! pagination) and delegates rendering details to `components`.

pub mod dashboard;
pub mod email;
pub mod signin;
