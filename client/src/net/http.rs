//! HTTP plumbing shared by the auth and email services.
//!
//! Client-side (hydrate): real requests via `gloo-net`, raced against a
//! `gloo-timers` timeout.
//! Server-side (SSR): the transport reports a transport failure, since these
//! endpoints are only meaningful in the browser.
//!
//! ERROR HANDLING
//! ==============
//! Bodies are read as text first and parsed second, so "server returned
//! non-JSON" and "server returned an error payload" stay distinguishable.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "http_test.rs"]
mod http_test;

use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::ApiError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Patch,
}

/// Transport-independent request description.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl HttpRequest {
    fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: vec![("Content-Type".to_owned(), "application/json".to_owned())],
            body: None,
        }
    }

    pub fn get(url: impl Into<String>) -> Self {
        Self::new(Method::Get, url)
    }

    pub fn patch(url: impl Into<String>) -> Self {
        Self::new(Method::Patch, url)
    }

    /// `POST` with a JSON body.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Decode`] if `body` cannot be serialized.
    pub fn post_json<T: Serialize>(url: impl Into<String>, body: &T) -> Result<Self, ApiError> {
        let raw = serde_json::to_string(body).map_err(|e| ApiError::Decode(e.to_string()))?;
        let mut request = Self::new(Method::Post, url);
        request.body = Some(raw);
        Ok(request)
    }

    /// Attach `Authorization: Bearer <token>`.
    #[must_use]
    pub fn bearer(mut self, token: &str) -> Self {
        self.headers.push(("Authorization".to_owned(), format!("Bearer {token}")));
        self
    }

    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Something that can execute an [`HttpRequest`].
///
/// Futures are not `Send`: in the browser everything runs on the single
/// event-loop thread.
#[async_trait(?Send)]
pub trait HttpTransport: Send + Sync {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError>;
}

/// Browser `fetch` transport with a per-request timeout.
#[derive(Clone, Copy, Debug)]
pub struct GlooTransport {
    timeout_ms: u32,
}

impl GlooTransport {
    pub fn new(timeout_ms: u32) -> Self {
        Self { timeout_ms }
    }
}

#[async_trait(?Send)]
impl HttpTransport for GlooTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        #[cfg(feature = "hydrate")]
        {
            use futures::future::{Either, select};
            use gloo_net::http::Request;

            let HttpRequest { method, url, headers, body } = request;
            let mut builder = match method {
                Method::Get => Request::get(&url),
                Method::Post => Request::post(&url),
                Method::Patch => Request::patch(&url),
            };
            for (name, value) in &headers {
                builder = builder.header(name, value);
            }

            let pending = async move {
                let sent = match body {
                    Some(raw) => builder.body(raw).map_err(|e| ApiError::Transport(e.to_string()))?.send().await,
                    None => builder.send().await,
                };
                let resp = sent.map_err(|e| ApiError::Transport(e.to_string()))?;
                let status = resp.status();
                let body = resp.text().await.map_err(|e| ApiError::Transport(e.to_string()))?;
                Ok(HttpResponse { status, body })
            };
            let timeout = gloo_timers::future::TimeoutFuture::new(self.timeout_ms);

            match select(Box::pin(pending), Box::pin(timeout)).await {
                Either::Left((result, _)) => result,
                Either::Right(((), _)) => {
                    log::warn!("{} {url} timed out after {} ms", method_name(method), self.timeout_ms);
                    Err(ApiError::Transport(format!("timed out after {} ms", self.timeout_ms)))
                }
            }
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (request, self.timeout_ms);
            Err(ApiError::Transport("not available on server".to_owned()))
        }
    }
}

#[cfg(feature = "hydrate")]
fn method_name(method: Method) -> &'static str {
    match method {
        Method::Get => "GET",
        Method::Post => "POST",
        Method::Patch => "PATCH",
    }
}

/// Parse the response body as JSON without looking at the status.
///
/// # Errors
///
/// Returns [`ApiError::InvalidResponse`] when the body is not JSON.
pub fn parse_json_body(response: &HttpResponse) -> Result<serde_json::Value, ApiError> {
    serde_json::from_str(&response.body).map_err(|_| {
        log::error!("invalid JSON response: {}", response.body);
        ApiError::InvalidResponse
    })
}

/// Non-empty `message` field of an error payload.
pub fn server_message(value: &serde_json::Value) -> Option<String> {
    value
        .get("message")
        .and_then(serde_json::Value::as_str)
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .map(str::to_owned)
}

/// Decode a JSON response into `T`, mapping non-2xx statuses to
/// [`ApiError::Server`] with the server message or `fallback`.
///
/// # Errors
///
/// Returns `InvalidResponse` for non-JSON bodies, `Server` for non-2xx
/// statuses, and `Decode` when the payload does not match `T`.
pub fn decode_response<T: DeserializeOwned>(response: &HttpResponse, fallback: &str) -> Result<T, ApiError> {
    let value = parse_json_body(response)?;
    if !response.is_success() {
        let message = server_message(&value).unwrap_or_else(|| fallback.to_owned());
        return Err(ApiError::Server { status: response.status, message });
    }
    serde_json::from_value(value).map_err(|e| ApiError::Decode(e.to_string()))
}
