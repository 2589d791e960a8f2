//! Build-time application configuration.
//!
//! SYSTEM CONTEXT
//! ==============
//! The browser bundle has no process environment, so settings are baked in at
//! compile time through `option_env!`. Parsing is kept in a pure function so
//! tests can exercise every value without touching the real build env.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use crate::error::ConfigError;

pub const DEFAULT_API_URL: &str = "https://email-list-api-4.onrender.com";
pub const DEFAULT_REQUEST_TIMEOUT_MS: u32 = 10_000;

/// Which credential exchange strategy the auth service uses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AuthBackendKind {
    /// In-memory user table, no network.
    #[default]
    Mock,
    /// `POST /api/auth/login` against the configured API.
    Http,
}

/// Where the token and user record are persisted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TokenStorageKind {
    /// `window.localStorage`, no expiry.
    #[default]
    Local,
    /// `document.cookie` with a 2-day expiry and `SameSite=Strict`.
    Cookie,
    /// Process memory; used during SSR and in tests.
    Memory,
}

/// Freshness and retry windows for the email query cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryTimings {
    pub list_stale_ms: u64,
    pub counts_stale_ms: u64,
    pub gc_ms: u64,
    pub read_retries: u32,
}

impl Default for QueryTimings {
    fn default() -> Self {
        Self { list_stale_ms: 2 * 60 * 1000, counts_stale_ms: 60 * 1000, gc_ms: 5 * 60 * 1000, read_retries: 1 }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub api_url: String,
    pub auth_backend: AuthBackendKind,
    pub token_storage: TokenStorageKind,
    pub request_timeout_ms: u32,
    pub queries: QueryTimings,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_owned(),
            auth_backend: AuthBackendKind::default(),
            token_storage: TokenStorageKind::default(),
            request_timeout_ms: DEFAULT_REQUEST_TIMEOUT_MS,
            queries: QueryTimings::default(),
        }
    }
}

impl AppConfig {
    /// Build typed config from raw values.
    ///
    /// Optional:
    /// - `api_url`: default [`DEFAULT_API_URL`], trailing `/` trimmed
    /// - `auth_backend`: `mock` (default) or `http`
    /// - `token_storage`: `local` (default), `cookie` or `memory`
    /// - `timeout_ms`: default [`DEFAULT_REQUEST_TIMEOUT_MS`]
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] naming the first value that fails to parse.
    pub fn from_values(
        api_url: Option<&str>,
        auth_backend: Option<&str>,
        token_storage: Option<&str>,
        timeout_ms: Option<&str>,
    ) -> Result<Self, ConfigError> {
        let api_url = parse_api_url(api_url)?;
        let auth_backend = parse_auth_backend(auth_backend)?;
        let token_storage = parse_token_storage(token_storage)?;
        let request_timeout_ms = match non_empty(timeout_ms) {
            None => DEFAULT_REQUEST_TIMEOUT_MS,
            Some(raw) => raw
                .parse::<u32>()
                .ok()
                .filter(|ms| *ms > 0)
                .ok_or_else(|| ConfigError::InvalidTimeout(raw.to_owned()))?,
        };

        Ok(Self { api_url, auth_backend, token_storage, request_timeout_ms, queries: QueryTimings::default() })
    }

    /// Config baked in by the `BRUTALISM_*` build environment.
    ///
    /// Invalid values are logged and replaced by defaults rather than failing
    /// the whole app at startup.
    pub fn from_build_env() -> Self {
        let parsed = Self::from_values(
            option_env!("BRUTALISM_API_URL"),
            option_env!("BRUTALISM_AUTH_BACKEND"),
            option_env!("BRUTALISM_TOKEN_STORAGE"),
            option_env!("BRUTALISM_REQUEST_TIMEOUT_MS"),
        );
        let mut config = parsed.unwrap_or_else(|e| {
            log::warn!("invalid build configuration, using defaults: {e}");
            Self::default()
        });
        // Browser storage does not exist while rendering on the server.
        if cfg!(not(feature = "hydrate")) {
            config.token_storage = TokenStorageKind::Memory;
        }
        config
    }
}

fn non_empty(raw: Option<&str>) -> Option<&str> {
    raw.map(str::trim).filter(|v| !v.is_empty())
}

fn parse_api_url(raw: Option<&str>) -> Result<String, ConfigError> {
    let Some(url) = non_empty(raw) else {
        return Ok(DEFAULT_API_URL.to_owned());
    };
    if !(url.starts_with("http://") || url.starts_with("https://")) {
        return Err(ConfigError::InvalidApiUrl(url.to_owned()));
    }
    Ok(url.trim_end_matches('/').to_owned())
}

fn parse_auth_backend(raw: Option<&str>) -> Result<AuthBackendKind, ConfigError> {
    match non_empty(raw).map(str::to_ascii_lowercase).as_deref() {
        None | Some("mock") => Ok(AuthBackendKind::Mock),
        Some("http") => Ok(AuthBackendKind::Http),
        Some(other) => Err(ConfigError::UnknownAuthBackend(other.to_owned())),
    }
}

fn parse_token_storage(raw: Option<&str>) -> Result<TokenStorageKind, ConfigError> {
    match non_empty(raw).map(str::to_ascii_lowercase).as_deref() {
        None | Some("local") => Ok(TokenStorageKind::Local),
        Some("cookie") => Ok(TokenStorageKind::Cookie),
        Some("memory") => Ok(TokenStorageKind::Memory),
        Some(other) => Err(ConfigError::UnknownTokenStorage(other.to_owned())),
    }
}
