//! Networking modules for the REST backend.
//!
//! SYSTEM CONTEXT
//! ==============
//! `http` owns the transport seam and body decoding, `auth_api` and
//! `email_api` are the two services built on it, and `types` defines the
//! wire schema.

pub mod auth_api;
pub mod email_api;
pub mod http;
pub mod types;

#[cfg(test)]
pub(crate) mod test_support;
