use super::*;
use crate::net::types::User;
use crate::util::storage::MemoryStore;

fn fresh() -> (Arc<MemoryStore>, TokenStore) {
    let backing = Arc::new(MemoryStore::default());
    let tokens = TokenStore::new(backing.clone());
    (backing, tokens)
}

fn ari() -> User {
    User {
        id: "2".to_owned(),
        email: "user@habaripay.com".to_owned(),
        name: "Ari budin".to_owned(),
        avatar: None,
    }
}

// =============================================================
// Token
// =============================================================

#[test]
fn token_read_after_write() {
    let (_, tokens) = fresh();
    assert_eq!(tokens.get_token(), None);
    assert!(!tokens.is_authenticated());
    tokens.set_token("tok-1");
    assert_eq!(tokens.get_token().as_deref(), Some("tok-1"));
    assert!(tokens.is_authenticated());
}

#[test]
fn empty_token_counts_as_absent() {
    let (backing, tokens) = fresh();
    backing.set(TOKEN_KEY, "");
    assert_eq!(tokens.get_token(), None);
}

// =============================================================
// User
// =============================================================

#[test]
fn user_read_after_write() {
    let (backing, tokens) = fresh();
    tokens.set_user(&ari());
    assert_eq!(tokens.get_user::<User>(), Some(ari()));
    assert!(backing.get(USER_KEY).unwrap().contains("Ari budin"));
}

#[test]
fn malformed_user_json_is_none() {
    let (backing, tokens) = fresh();
    for raw in ["", "{", "not json", "null", "42", r#"{"id": 1}"#, r#"{"name":"x"}"#] {
        backing.set(USER_KEY, raw);
        assert_eq!(tokens.get_user::<User>(), None, "raw = {raw:?}");
    }
}

#[test]
fn absent_user_is_none() {
    let (_, tokens) = fresh();
    assert_eq!(tokens.get_user::<User>(), None);
}

// =============================================================
// clear_auth
// =============================================================

#[test]
fn clear_auth_removes_both() {
    let (_, tokens) = fresh();
    tokens.set_token("tok");
    tokens.set_user(&ari());
    tokens.clear_auth();
    assert_eq!(tokens.get_token(), None);
    assert_eq!(tokens.get_user::<User>(), None);
}

#[test]
fn clones_share_backing_store() {
    let (_, tokens) = fresh();
    let other = tokens.clone();
    tokens.set_token("shared");
    assert_eq!(other.get_token().as_deref(), Some("shared"));
}
