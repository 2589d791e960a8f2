//! REST client for the email endpoints.
//!
//! Every call requires a stored token and fails with
//! [`ApiError::Unauthorized`] before dispatch when there is none.

#[cfg(test)]
#[path = "email_api_test.rs"]
mod email_api_test;

use std::sync::Arc;

use super::http::{HttpRequest, HttpTransport, decode_response, parse_json_body, server_message};
use super::types::{DataEnvelope, Email, EmailCounts, EmailFilters, EmailListResponse};
use crate::error::ApiError;
use crate::util::token_store::TokenStore;

const LIST_FALLBACK: &str = "Failed to fetch emails";
const STAR_FALLBACK: &str = "Failed to toggle star";
const COUNTS_FALLBACK: &str = "Failed to fetch email counts";

/// Query string for `filters`: present fields only, in the order
/// `view, search, page, limit, labels`.
pub fn email_query_string(filters: &EmailFilters) -> String {
    let mut params: Vec<(&str, String)> = Vec::new();
    if let Some(view) = filters.view {
        params.push(("view", view.as_str().to_owned()));
    }
    if let Some(search) = filters.search.as_deref().filter(|s| !s.is_empty()) {
        params.push(("search", search.to_owned()));
    }
    if let Some(page) = filters.page.filter(|p| *p > 0) {
        params.push(("page", page.to_string()));
    }
    if let Some(limit) = filters.limit.filter(|l| *l > 0) {
        params.push(("limit", limit.to_string()));
    }
    if let Some(labels) = filters.labels.as_ref().filter(|l| !l.is_empty()) {
        params.push(("labels", labels.join(",")));
    }
    let mut query = form_urlencoded::Serializer::new(String::new());
    query.extend_pairs(params);
    query.finish()
}

/// `email_id` escaped for use as a single path segment.
fn path_segment(email_id: &str) -> String {
    form_urlencoded::byte_serialize(email_id.as_bytes()).collect()
}

#[derive(Clone)]
pub struct EmailService {
    base_url: String,
    transport: Arc<dyn HttpTransport>,
    tokens: TokenStore,
}

impl EmailService {
    pub fn new(base_url: impl Into<String>, transport: Arc<dyn HttpTransport>, tokens: TokenStore) -> Self {
        Self { base_url: base_url.into(), transport, tokens }
    }

    fn token(&self) -> Result<String, ApiError> {
        self.tokens.get_token().ok_or(ApiError::Unauthorized)
    }

    /// One page of emails matching `filters`.
    ///
    /// # Errors
    ///
    /// `Unauthorized` without a token, otherwise transport/protocol errors.
    pub async fn get_emails(&self, filters: &EmailFilters) -> Result<EmailListResponse, ApiError> {
        let token = self.token()?;
        let url = format!("{}/api/emails?{}", self.base_url, email_query_string(filters));
        let response = self.transport.send(HttpRequest::get(url).bearer(&token)).await;
        response
            .and_then(|r| {
                let page: EmailListResponse = decode_response(&r, LIST_FALLBACK)?;
                if page.success {
                    return Ok(page);
                }
                let message = parse_json_body(&r)
                    .ok()
                    .and_then(|v| server_message(&v))
                    .unwrap_or_else(|| LIST_FALLBACK.to_owned());
                Err(ApiError::Server { status: r.status, message })
            })
            .inspect_err(|e| log::error!("get emails error: {e}"))
    }

    /// Flip the star flag of `email_id`, returning the updated email.
    ///
    /// # Errors
    ///
    /// `Unauthorized` without a token, otherwise transport/protocol errors.
    pub async fn toggle_star(&self, email_id: &str) -> Result<Email, ApiError> {
        let token = self.token()?;
        let url = format!("{}/api/emails/{}/star", self.base_url, path_segment(email_id));
        let response = self.transport.send(HttpRequest::patch(url).bearer(&token)).await;
        response
            .and_then(|r| decode_response::<DataEnvelope<Email>>(&r, STAR_FALLBACK))
            .map(|env| env.data)
            .inspect_err(|e| log::error!("toggle star error: {e}"))
    }

    /// Sidebar badge counts.
    ///
    /// # Errors
    ///
    /// `Unauthorized` without a token, otherwise transport/protocol errors.
    pub async fn get_email_counts(&self) -> Result<EmailCounts, ApiError> {
        let token = self.token()?;
        let url = format!("{}/api/emails/counts", self.base_url);
        let response = self.transport.send(HttpRequest::get(url).bearer(&token)).await;
        response
            .and_then(|r| decode_response::<DataEnvelope<EmailCounts>>(&r, COUNTS_FALLBACK))
            .map(|env| env.data)
            .inspect_err(|e| log::error!("get email counts error: {e}"))
    }
}
