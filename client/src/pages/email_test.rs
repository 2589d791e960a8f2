use super::*;

fn pagination(page: u32, total: u32, total_pages: u32) -> Pagination {
    Pagination { page, limit: PAGE_LIMIT, total, total_pages }
}

// =============================================================
// Filters
// =============================================================

#[test]
fn filters_carry_view_page_and_fixed_limit() {
    let filters = build_filters(EmailView::Starred, "", 3);
    assert_eq!(filters.view, Some(EmailView::Starred));
    assert_eq!(filters.page, Some(3));
    assert_eq!(filters.limit, Some(15));
    assert_eq!(filters.search, None);
    assert_eq!(filters.labels, None);
}

#[test]
fn non_empty_search_is_included_verbatim() {
    let filters = build_filters(EmailView::Inbox, "q3 report", 1);
    assert_eq!(filters.search.as_deref(), Some("q3 report"));
}

#[test]
fn equal_inputs_build_equal_cache_keys() {
    assert_eq!(build_filters(EmailView::Inbox, "x", 2), build_filters(EmailView::Inbox, "x", 2));
    assert_ne!(build_filters(EmailView::Inbox, "x", 2), build_filters(EmailView::Inbox, "x", 3));
}

// =============================================================
// Pagination
// =============================================================

#[test]
fn label_shows_range_of_current_page() {
    assert_eq!(pagination_label(&pagination(1, 42, 3)), "1-15 of 42");
    assert_eq!(pagination_label(&pagination(2, 42, 3)), "16-30 of 42");
}

#[test]
fn label_clamps_last_page_to_total() {
    assert_eq!(pagination_label(&pagination(3, 42, 3)), "31-42 of 42");
}

#[test]
fn label_for_empty_result() {
    assert_eq!(pagination_label(&pagination(1, 0, 0)), "0-0 of 0");
    assert_eq!(pagination_label(&Pagination::default()), "0-0 of 0");
}

#[test]
fn label_treats_page_zero_as_first_page() {
    assert_eq!(pagination_label(&pagination(0, 42, 3)), "1-15 of 42");
}

#[test]
fn label_saturates_on_huge_server_values() {
    let huge = Pagination { page: u32::MAX, limit: u32::MAX, total: 10, total_pages: 1 };
    assert_eq!(pagination_label(&huge), "10-10 of 10");
}

#[test]
fn prev_disabled_on_first_page() {
    assert!(!can_go_prev(1));
    assert!(can_go_prev(2));
}

#[test]
fn next_disabled_on_or_past_last_page() {
    assert!(can_go_next(1, 3));
    assert!(!can_go_next(3, 3));
    assert!(!can_go_next(1, 0));
}
