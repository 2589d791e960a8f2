use super::*;

// =============================================================
// User
// =============================================================

#[test]
fn user_without_avatar_omits_field() {
    let user = User { id: "2".to_owned(), email: "a@b.com".to_owned(), name: "A".to_owned(), avatar: None };
    let json = serde_json::to_value(&user).unwrap();
    assert_eq!(json, serde_json::json!({"id": "2", "email": "a@b.com", "name": "A"}));
}

#[test]
fn user_missing_name_fails_to_decode() {
    let result = serde_json::from_str::<User>(r#"{"id":"1","email":"a@b.com"}"#);
    assert!(result.is_err());
}

// =============================================================
// LoginEnvelope
// =============================================================

#[test]
fn login_envelope_decodes_success_payload() {
    let body = r#"{
        "success": true,
        "data": {"user": {"id": "7", "email": "x@y.z", "name": "X"}, "token": "tok"},
        "message": "Login successful"
    }"#;
    let env: LoginEnvelope = serde_json::from_str(body).unwrap();
    assert!(env.success);
    let data = env.data.unwrap();
    assert_eq!(data.token, "tok");
    assert_eq!(data.user.name, "X");
}

#[test]
fn login_envelope_failure_keeps_message() {
    let env: LoginEnvelope = serde_json::from_str(r#"{"success": false, "message": "Nope"}"#).unwrap();
    assert!(!env.success);
    assert!(env.data.is_none());
    assert_eq!(env.message.as_deref(), Some("Nope"));
}

// =============================================================
// EmailView
// =============================================================

#[test]
fn email_view_serializes_lowercase() {
    assert_eq!(serde_json::to_string(&EmailView::Important).unwrap(), "\"important\"");
    for view in EmailView::ALL {
        assert_eq!(serde_json::to_value(view).unwrap(), serde_json::json!(view.as_str()));
    }
}

#[test]
fn email_view_count_lookup() {
    let counts = EmailCounts { inbox: 12, starred: 3, important: 4, unread: 5, drafts: 1, sent: 9 };
    assert_eq!(EmailView::Inbox.count_in(&counts), Some(12));
    assert_eq!(EmailView::Sent.count_in(&counts), Some(9));
    assert_eq!(EmailView::Trash.count_in(&counts), None);
}

// =============================================================
// EmailFilters
// =============================================================

#[test]
fn email_filters_equal_by_value() {
    let a = EmailFilters { view: Some(EmailView::Inbox), page: Some(1), limit: Some(15), ..Default::default() };
    let b = EmailFilters { view: Some(EmailView::Inbox), page: Some(1), limit: Some(15), ..Default::default() };
    let c = EmailFilters { page: Some(2), ..b.clone() };
    assert_eq!(a, b);
    assert_ne!(a, c);
}

// =============================================================
// Email list
// =============================================================

#[test]
fn email_list_response_decodes_camel_case_fields() {
    let body = r#"{
        "success": true,
        "data": [{
            "id": "e1",
            "from": {"name": "Ana", "email": "ana@example.com"},
            "subject": "Hello",
            "body": "Body text",
            "timestamp": "2025-01-02T10:00:00Z",
            "isStarred": true,
            "isRead": false,
            "hasAttachments": true,
            "labels": ["work"],
            "attachments": [{"filename": "a.pdf", "size": 1024, "type": "application/pdf"}]
        }],
        "pagination": {"page": 2, "limit": 15, "total": 40, "totalPages": 3}
    }"#;
    let resp: EmailListResponse = serde_json::from_str(body).unwrap();
    assert_eq!(resp.pagination, Pagination { page: 2, limit: 15, total: 40, total_pages: 3 });
    let email = &resp.data[0];
    assert!(email.is_starred);
    assert!(!email.is_read);
    assert!(!email.is_important);
    assert_eq!(email.attachments[0].mime_type.as_deref(), Some("application/pdf"));
    assert_eq!(email.from.as_ref().map(|c| c.name.as_str()), Some("Ana"));
}

#[test]
fn email_list_response_without_pagination_uses_default() {
    let resp: EmailListResponse = serde_json::from_str(r#"{"data": []}"#).unwrap();
    assert_eq!(resp.pagination, Pagination::default());
    assert!(resp.success);
}

#[test]
fn counts_envelope_decodes() {
    let body = r#"{"data": {"inbox": 1, "starred": 2, "important": 3, "unread": 4, "drafts": 5, "sent": 6}}"#;
    let env: DataEnvelope<EmailCounts> = serde_json::from_str(body).unwrap();
    assert_eq!(env.data.drafts, 5);
}
