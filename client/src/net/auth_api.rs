//! Auth service: credential exchange plus token persistence.
//!
//! ARCHITECTURE
//! ============
//! [`AuthBackend`] is the strategy seam. `MockAuthBackend` checks an
//! in-memory user table, `HttpAuthBackend` calls `POST /api/auth/login`.
//! [`AuthService`] owns the parts both share: persisting the token and user
//! on success, clearing them on logout, and local token validation.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "auth_api_test.rs"]
mod auth_api_test;

use std::sync::Arc;

use async_trait::async_trait;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;

use super::http::{HttpRequest, HttpTransport, parse_json_body, server_message};
use super::types::{AuthResponse, LoginCredentials, LoginEnvelope, User};
use crate::config::{AppConfig, AuthBackendKind};
use crate::error::{ApiError, LOGIN_FAILED_MESSAGE};
use crate::util::time::{now_millis, sleep};
use crate::util::token_store::TokenStore;

/// Credential exchange strategy.
#[async_trait(?Send)]
pub trait AuthBackend: Send + Sync {
    /// Exchange credentials for a user and token.
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<AuthResponse, ApiError>;

    /// Tell the backend the session is over. Local state is cleared by the
    /// caller regardless of the outcome.
    async fn end_session(&self, token: &str) -> Result<(), ApiError> {
        let _ = token;
        Ok(())
    }

    /// Confirm a stored token still belongs to `user`. `Ok(None)` means the
    /// session is gone.
    async fn confirm(&self, token: &str, user: User) -> Result<Option<User>, ApiError> {
        let _ = token;
        Ok(Some(user))
    }
}

/// Build the backend selected by `config`.
pub fn backend_for(config: &AppConfig, transport: Arc<dyn HttpTransport>) -> Arc<dyn AuthBackend> {
    match config.auth_backend {
        AuthBackendKind::Mock => Arc::new(MockAuthBackend::seeded()),
        AuthBackendKind::Http => Arc::new(HttpAuthBackend::new(config.api_url.clone(), transport)),
    }
}

// =============================================================
// Mock backend
// =============================================================

#[derive(Clone, Debug)]
struct MockAccount {
    user: User,
    password: String,
}

/// Simulated round-trip delays, only observable in the browser build.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MockLatency {
    pub login_ms: u32,
    pub logout_ms: u32,
    pub validate_ms: u32,
}

impl Default for MockLatency {
    fn default() -> Self {
        Self { login_ms: 800, logout_ms: 300, validate_ms: 300 }
    }
}

/// In-memory user table standing in for a real auth server.
#[derive(Clone, Debug)]
pub struct MockAuthBackend {
    accounts: Vec<MockAccount>,
    latency: MockLatency,
}

impl MockAuthBackend {
    /// Backend with the demo account `user@habaripay.com` / `user123`.
    pub fn seeded() -> Self {
        Self {
            accounts: vec![MockAccount {
                user: User {
                    id: "2".to_owned(),
                    email: "user@habaripay.com".to_owned(),
                    name: "Ari budin".to_owned(),
                    avatar: Some("https://brutalism.tailwinddashboard.com/src/img/avatar/male3.jpg".to_owned()),
                },
                password: "user123".to_owned(),
            }],
            latency: MockLatency::default(),
        }
    }

    #[must_use]
    pub fn with_latency(mut self, latency: MockLatency) -> Self {
        self.latency = latency;
        self
    }
}

/// Opaque demo token: base64 of `email:issued_at_ms`.
pub fn mock_token(email: &str, issued_at_ms: u64) -> String {
    BASE64.encode(format!("{email}:{issued_at_ms}"))
}

#[async_trait(?Send)]
impl AuthBackend for MockAuthBackend {
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<AuthResponse, ApiError> {
        sleep(self.latency.login_ms).await;
        let account = self
            .accounts
            .iter()
            .find(|a| a.user.email == credentials.email && a.password == credentials.password)
            .ok_or(ApiError::InvalidCredentials)?;
        Ok(AuthResponse { user: account.user.clone(), token: mock_token(&account.user.email, now_millis()) })
    }

    async fn end_session(&self, _token: &str) -> Result<(), ApiError> {
        sleep(self.latency.logout_ms).await;
        Ok(())
    }

    async fn confirm(&self, _token: &str, user: User) -> Result<Option<User>, ApiError> {
        sleep(self.latency.validate_ms).await;
        Ok(Some(user))
    }
}

// =============================================================
// HTTP backend
// =============================================================

/// Real auth API at `{base_url}/api/auth/login`.
#[derive(Clone)]
pub struct HttpAuthBackend {
    base_url: String,
    transport: Arc<dyn HttpTransport>,
}

impl HttpAuthBackend {
    pub fn new(base_url: impl Into<String>, transport: Arc<dyn HttpTransport>) -> Self {
        Self { base_url: base_url.into(), transport }
    }

    fn login_endpoint(&self) -> String {
        format!("{}/api/auth/login", self.base_url)
    }
}

#[async_trait(?Send)]
impl AuthBackend for HttpAuthBackend {
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<AuthResponse, ApiError> {
        let request = HttpRequest::post_json(self.login_endpoint(), credentials)?;
        let response = self.transport.send(request).await?;
        let value = parse_json_body(&response)?;
        let failure = ApiError::Login(server_message(&value).unwrap_or_else(|| LOGIN_FAILED_MESSAGE.to_owned()));
        if !response.is_success() {
            return Err(failure);
        }
        let envelope: LoginEnvelope = serde_json::from_value(value).map_err(|e| ApiError::Decode(e.to_string()))?;
        match envelope {
            LoginEnvelope { success: true, data: Some(data), .. } => Ok(data),
            LoginEnvelope { success: true, data: None, .. } => Err(ApiError::Decode("missing login data".to_owned())),
            LoginEnvelope { success: false, .. } => Err(failure),
        }
    }
}

// =============================================================
// Service
// =============================================================

/// Login/logout/validate over a backend, persisting through [`TokenStore`].
#[derive(Clone)]
pub struct AuthService {
    backend: Arc<dyn AuthBackend>,
    tokens: TokenStore,
}

impl AuthService {
    pub fn new(backend: Arc<dyn AuthBackend>, tokens: TokenStore) -> Self {
        Self { backend, tokens }
    }

    /// Authenticate and persist token + user before returning.
    ///
    /// # Errors
    ///
    /// Returns the backend's error; nothing is persisted on failure.
    pub async fn login(&self, credentials: &LoginCredentials) -> Result<AuthResponse, ApiError> {
        let response = self.backend.authenticate(credentials).await.inspect_err(|e| {
            log::error!("login failed: {e}");
        })?;
        self.tokens.set_token(&response.token);
        self.tokens.set_user(&response.user);
        Ok(response)
    }

    /// End the session. Always clears local state, even if the backend fails.
    pub async fn logout(&self) {
        if let Some(token) = self.tokens.get_token() {
            if let Err(e) = self.backend.end_session(&token).await {
                log::warn!("backend logout failed, clearing local session anyway: {e}");
            }
        }
        self.tokens.clear_auth();
    }

    /// Stored user if both token and user are present and the backend still
    /// accepts them. Missing credentials clear storage and yield `Ok(None)`
    /// without touching the network.
    ///
    /// # Errors
    ///
    /// Propagates unexpected backend failures during confirmation.
    pub async fn validate_token(&self) -> Result<Option<User>, ApiError> {
        let (Some(token), Some(user)) = (self.tokens.get_token(), self.tokens.get_user::<User>()) else {
            self.tokens.clear_auth();
            return Ok(None);
        };
        let confirmed = self.backend.confirm(&token, user).await?;
        if confirmed.is_none() {
            self.tokens.clear_auth();
        }
        Ok(confirmed)
    }

    pub fn stored_token(&self) -> Option<String> {
        self.tokens.get_token()
    }

    pub fn stored_user(&self) -> Option<User> {
        self.tokens.get_user()
    }

    pub fn tokens(&self) -> &TokenStore {
        &self.tokens
    }
}
