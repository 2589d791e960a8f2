use super::*;
use crate::net::http::Method;
use crate::net::test_support::ScriptedTransport;
use crate::net::types::EmailView;
use crate::util::storage::MemoryStore;
use futures::executor::block_on;

fn service(with_token: bool) -> (Arc<ScriptedTransport>, EmailService) {
    let transport = Arc::new(ScriptedTransport::new());
    let tokens = TokenStore::new(Arc::new(MemoryStore::default()));
    if with_token {
        tokens.set_token("tok-123");
    }
    let service = EmailService::new("https://api.test", transport.clone(), tokens);
    (transport, service)
}

fn inbox_page_one() -> EmailFilters {
    EmailFilters { view: Some(EmailView::Inbox), page: Some(1), limit: Some(15), ..Default::default() }
}

fn email_json(id: &str, starred: bool) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "subject": "Quarterly numbers",
        "body": "See attached",
        "timestamp": "2025-03-10T15:07:00Z",
        "isStarred": starred,
        "isRead": true,
        "hasAttachments": false
    })
}

// =============================================================
// Query string
// =============================================================

#[test]
fn query_string_includes_present_fields_in_order() {
    let filters = EmailFilters {
        view: Some(EmailView::Starred),
        labels: Some(vec!["work".to_owned(), "urgent".to_owned()]),
        search: Some("q3 report".to_owned()),
        page: Some(2),
        limit: Some(15),
    };
    assert_eq!(email_query_string(&filters), "view=starred&search=q3+report&page=2&limit=15&labels=work%2Curgent");
}

#[test]
fn query_string_omits_absent_and_empty_fields() {
    assert_eq!(email_query_string(&EmailFilters::default()), "");
    let filters = EmailFilters { search: Some(String::new()), labels: Some(vec![]), ..inbox_page_one() };
    assert_eq!(email_query_string(&filters), "view=inbox&page=1&limit=15");
}

#[test]
fn query_string_escapes_reserved_characters() {
    let filters = EmailFilters { search: Some("a&b=c".to_owned()), ..Default::default() };
    assert_eq!(email_query_string(&filters), "search=a%26b%3Dc");
}

#[test]
fn query_string_escapes_non_ascii_and_unreserved_symbols() {
    let filters = EmailFilters { search: Some("café a~b".to_owned()), ..Default::default() };
    assert_eq!(email_query_string(&filters), "search=caf%C3%A9+a%7Eb");
}

// =============================================================
// Unauthorized
// =============================================================

#[test]
fn get_emails_without_token_fails_before_network() {
    let (transport, service) = service(false);
    let err = block_on(service.get_emails(&inbox_page_one())).unwrap_err();
    assert_eq!(err, ApiError::Unauthorized);
    assert_eq!(transport.request_count(), 0);
}

#[test]
fn toggle_and_counts_without_token_fail_before_network() {
    let (transport, service) = service(false);
    assert_eq!(block_on(service.toggle_star("e1")).unwrap_err(), ApiError::Unauthorized);
    assert_eq!(block_on(service.get_email_counts()).unwrap_err(), ApiError::Unauthorized);
    assert_eq!(transport.request_count(), 0);
}

// =============================================================
// get_emails
// =============================================================

#[test]
fn get_emails_sends_bearer_and_decodes_page() {
    let (transport, service) = service(true);
    transport.push_json(
        200,
        serde_json::json!({
            "success": true,
            "data": [email_json("e1", false), email_json("e2", true)],
            "pagination": {"page": 1, "limit": 15, "total": 2, "totalPages": 1}
        }),
    );

    let resp = block_on(service.get_emails(&inbox_page_one())).unwrap();
    assert_eq!(resp.data.len(), 2);
    assert!(resp.data[1].is_starred);
    assert_eq!(resp.pagination.total_pages, 1);

    let req = &transport.requests()[0];
    assert_eq!(req.method, Method::Get);
    assert_eq!(req.url, "https://api.test/api/emails?view=inbox&page=1&limit=15");
    assert_eq!(req.header("Authorization"), Some("Bearer tok-123"));
    assert_eq!(req.header("Content-Type"), Some("application/json"));
}

#[test]
fn get_emails_error_uses_server_message() {
    let (transport, service) = service(true);
    transport.push_json(401, serde_json::json!({"success": false, "message": "Invalid token"}));
    let err = block_on(service.get_emails(&inbox_page_one())).unwrap_err();
    assert_eq!(err, ApiError::Server { status: 401, message: "Invalid token".to_owned() });
}

#[test]
fn get_emails_error_without_message_uses_fallback() {
    let (transport, service) = service(true);
    transport.push_json(500, serde_json::json!({"success": false}));
    let err = block_on(service.get_emails(&inbox_page_one())).unwrap_err();
    assert_eq!(err.to_string(), "Failed to fetch emails");
}

#[test]
fn get_emails_non_json_is_invalid_response() {
    let (transport, service) = service(true);
    transport.push_raw(200, "Service waking up...");
    let err = block_on(service.get_emails(&inbox_page_one())).unwrap_err();
    assert_eq!(err, ApiError::InvalidResponse);
}

// =============================================================
// toggle_star / counts
// =============================================================

#[test]
fn toggle_star_patches_and_returns_email() {
    let (transport, service) = service(true);
    transport.push_json(200, serde_json::json!({"data": email_json("e7", true), "message": "Starred"}));
    let email = block_on(service.toggle_star("e7")).unwrap();
    assert_eq!(email.id, "e7");
    assert!(email.is_starred);
    let req = &transport.requests()[0];
    assert_eq!(req.method, Method::Patch);
    assert_eq!(req.url, "https://api.test/api/emails/e7/star");
}

#[test]
fn toggle_star_escapes_email_id_in_path() {
    let (transport, service) = service(true);
    transport.push_json(200, serde_json::json!({"data": email_json("a/b?c", true)}));
    block_on(service.toggle_star("a/b?c")).unwrap();
    assert_eq!(transport.requests()[0].url, "https://api.test/api/emails/a%2Fb%3Fc/star");
}

#[test]
fn get_emails_success_false_is_an_error() {
    let (transport, service) = service(true);
    transport.push_json(200, serde_json::json!({"success": false, "data": [], "message": "Mailbox unavailable"}));
    let err = block_on(service.get_emails(&inbox_page_one())).unwrap_err();
    assert_eq!(err, ApiError::Server { status: 200, message: "Mailbox unavailable".to_owned() });
}

#[test]
fn get_emails_success_false_without_message_uses_fallback() {
    let (transport, service) = service(true);
    transport.push_json(200, serde_json::json!({"success": false, "data": []}));
    let err = block_on(service.get_emails(&inbox_page_one())).unwrap_err();
    assert_eq!(err.to_string(), "Failed to fetch emails");
}

#[test]
fn toggle_star_error_fallback() {
    let (transport, service) = service(true);
    transport.push_json(404, serde_json::json!({}));
    assert_eq!(block_on(service.toggle_star("gone")).unwrap_err().to_string(), "Failed to toggle star");
}

#[test]
fn counts_decodes_data() {
    let (transport, service) = service(true);
    transport.push_json(
        200,
        serde_json::json!({"data": {"inbox": 20, "starred": 3, "important": 2, "unread": 7, "drafts": 1, "sent": 4}}),
    );
    let counts = block_on(service.get_email_counts()).unwrap();
    assert_eq!(counts.unread, 7);
    assert_eq!(transport.requests()[0].url, "https://api.test/api/emails/counts");
}

#[test]
fn counts_error_fallback() {
    let (transport, service) = service(true);
    transport.push_json(503, serde_json::json!({"message": ""}));
    assert_eq!(block_on(service.get_email_counts()).unwrap_err().to_string(), "Failed to fetch email counts");
}
