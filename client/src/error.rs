//! Uniform error type for every service-layer failure.
//!
//! ERROR HANDLING
//! ==============
//! Transport, protocol, authorization and credential failures all collapse
//! into `ApiError`. `Display` is the human-readable message the UI shows, so
//! pages never inspect variants to build text.

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

/// Message shown when no response was received at all.
pub const NO_RESPONSE_MESSAGE: &str = "No response from server. Please check your connection.";

/// Message shown when the body could not be parsed as JSON.
pub const INVALID_RESPONSE_MESSAGE: &str = "Invalid response from server";

/// Message shown when the credentials are rejected.
pub const INVALID_CREDENTIALS_MESSAGE: &str = "Invalid email or password";

/// Generic login failure when the server supplied no message.
pub const LOGIN_FAILED_MESSAGE: &str = "Login failed";

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// The request never produced a response (network down, CORS, timeout).
    #[error("No response from server. Please check your connection.")]
    Transport(String),
    /// Non-2xx status or a `success: false` body; `message` is the
    /// server-supplied or fallback text.
    #[error("{message}")]
    Server { status: u16, message: String },
    /// The body was not JSON.
    #[error("Invalid response from server")]
    InvalidResponse,
    /// The body was JSON but did not match the expected schema.
    #[error("Invalid response from server")]
    Decode(String),
    /// No token is stored, checked before dispatch.
    #[error("Unauthorized")]
    Unauthorized,
    /// The mock backend rejected the credentials.
    #[error("Invalid email or password")]
    InvalidCredentials,
    /// The login endpoint answered but reported failure.
    #[error("{0}")]
    Login(String),
}

impl ApiError {
    /// Whether a read query may be retried after this failure.
    ///
    /// `Unauthorized` is raised before any request is issued, so retrying it
    /// can never succeed.
    pub fn is_retryable(&self) -> bool {
        !matches!(self, Self::Unauthorized | Self::InvalidCredentials)
    }

    /// Human-readable message for display.
    pub fn message(&self) -> String {
        self.to_string()
    }
}

/// Invalid build-time configuration value.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("unknown auth backend: {0} (expected `mock` or `http`)")]
    UnknownAuthBackend(String),
    #[error("unknown token storage: {0} (expected `local`, `cookie` or `memory`)")]
    UnknownTokenStorage(String),
    #[error("invalid request timeout: {0}")]
    InvalidTimeout(String),
    #[error("api url must start with http:// or https://: {0}")]
    InvalidApiUrl(String),
}
