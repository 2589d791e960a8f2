//! Wire-protocol DTOs for the auth and email REST endpoints.
//!
//! DESIGN
//! ======
//! Every response shape gets an explicit schema so malformed payloads fail at
//! the service boundary with a typed decode error instead of leaking loosely
//! shaped JSON into the UI.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::{Deserialize, Serialize};

/// Authenticated user as returned by login and persisted in the token store.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub email: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginCredentials {
    pub email: String,
    pub password: String,
}

/// Successful login outcome.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthResponse {
    pub user: User,
    pub token: String,
}

/// `POST /api/auth/login` body: `{success, data: {user, token}, message}`.
#[derive(Clone, Debug, Deserialize)]
pub struct LoginEnvelope {
    #[serde(default = "default_true")]
    pub success: bool,
    #[serde(default)]
    pub data: Option<AuthResponse>,
    #[serde(default)]
    pub message: Option<String>,
}

fn default_true() -> bool {
    true
}

/// Mailbox folder the list view is showing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmailView {
    #[default]
    Inbox,
    Starred,
    Sent,
    Important,
    Drafts,
    Trash,
}

impl EmailView {
    pub const ALL: [Self; 6] = [Self::Inbox, Self::Starred, Self::Sent, Self::Important, Self::Drafts, Self::Trash];

    /// Query-string value.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Inbox => "inbox",
            Self::Starred => "starred",
            Self::Sent => "sent",
            Self::Important => "important",
            Self::Drafts => "drafts",
            Self::Trash => "trash",
        }
    }

    /// Sidebar label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Inbox => "Inbox",
            Self::Starred => "Starred",
            Self::Sent => "Sent",
            Self::Important => "Important",
            Self::Drafts => "Drafts",
            Self::Trash => "Trash",
        }
    }

    /// Badge count for this view, if the counts endpoint reports one.
    pub fn count_in(self, counts: &EmailCounts) -> Option<u32> {
        match self {
            Self::Inbox => Some(counts.inbox),
            Self::Starred => Some(counts.starred),
            Self::Sent => Some(counts.sent),
            Self::Important => Some(counts.important),
            Self::Drafts => Some(counts.drafts),
            Self::Trash => None,
        }
    }
}

/// Request-shaping value for `GET /api/emails`.
///
/// Compared and hashed by value: it doubles as the list cache key.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct EmailFilters {
    pub view: Option<EmailView>,
    pub labels: Option<Vec<String>>,
    pub search: Option<String>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailContact {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailAttachment {
    #[serde(default)]
    pub id: Option<String>,
    pub filename: String,
    #[serde(default)]
    pub size: Option<u64>,
    #[serde(default, alias = "type")]
    pub mime_type: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

/// One message in a page of results.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Email {
    pub id: String,
    #[serde(default)]
    pub from: Option<EmailContact>,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub body: String,
    /// RFC 3339 timestamp.
    pub timestamp: String,
    #[serde(default)]
    pub is_starred: bool,
    #[serde(default)]
    pub is_read: bool,
    #[serde(default)]
    pub is_important: bool,
    #[serde(default)]
    pub has_attachments: bool,
    #[serde(default)]
    pub labels: Vec<String>,
    #[serde(default)]
    pub attachments: Vec<EmailAttachment>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page: u32,
    pub limit: u32,
    pub total: u32,
    pub total_pages: u32,
}

impl Default for Pagination {
    fn default() -> Self {
        Self { page: 1, limit: 15, total: 0, total_pages: 0 }
    }
}

/// `GET /api/emails` body.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailListResponse {
    #[serde(default = "default_true")]
    pub success: bool,
    pub data: Vec<Email>,
    #[serde(default)]
    pub pagination: Pagination,
}

/// Sidebar badge counts from `GET /api/emails/counts`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailCounts {
    pub inbox: u32,
    pub starred: u32,
    pub important: u32,
    pub unread: u32,
    pub drafts: u32,
    pub sent: u32,
}

/// `{data: T, message?}` wrapper used by the star and counts endpoints.
#[derive(Clone, Debug, Deserialize)]
pub struct DataEnvelope<T> {
    pub data: T,
}
