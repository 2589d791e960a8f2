use super::*;

#[test]
fn nav_item_is_active_only_on_exact_path() {
    let email = NAV_ITEMS[1];
    assert!(is_active(&email, "/apps/email"));
    assert!(!is_active(&email, "/"));
    assert!(is_active(&NAV_ITEMS[0], "/"));
    assert!(!is_active(&NAV_ITEMS[0], "/apps/email"));
}

#[test]
fn initial_uppercases_first_letter() {
    assert_eq!(initial("ari budin"), "A");
    assert_eq!(initial("  zoe"), "Z");
}

#[test]
fn initial_falls_back_for_blank_names() {
    assert_eq!(initial(""), "U");
    assert_eq!(initial("   "), "U");
}
