//! Tests for the pagination resolver

use super::*;
use pretty_assertions::assert_eq;
use serde_json::json;

// ============================================================================
// Link-based pagination
// ============================================================================

#[test]
fn test_next_link_with_token() {
    let body = json!({
        "paging": {
            "_links": {
                "next": {
                    "href": "https://api.example.com/admission-items?token=abc123&x=1"
                }
            }
        }
    });

    let token = next_page_token_from_value(&body, None);
    assert_eq!(token, Some("abc123".to_string()));
}

#[test]
fn test_next_link_token_at_end() {
    let body = json!({
        "paging": {
            "_links": {
                "next": { "href": "https://api.example.com/items?after=x&token=zzz" }
            }
        }
    });

    assert_eq!(
        next_page_token_from_value(&body, None),
        Some("zzz".to_string())
    );
}

#[test]
fn test_next_link_without_token_param() {
    let body = json!({
        "paging": {
            "_links": {
                "next": { "href": "https://api.example.com/items?page=2" }
            }
        }
    });

    assert_eq!(next_page_token_from_value(&body, Some("tok0")), None);
}

#[test]
fn test_next_link_wins_over_current_token() {
    let body = json!({
        "paging": {
            "_links": {
                "next": { "href": "https://api.example.com/items?token=from-link" }
            },
            "currentToken": "from-counter",
            "totalCount": 100
        },
        "data": [{"id": "1"}]
    });

    assert_eq!(
        next_page_token_from_value(&body, None),
        Some("from-link".to_string())
    );
}

// ============================================================================
// Counter-based pagination
// ============================================================================

#[test]
fn test_current_token_more_pages() {
    let data: Vec<_> = (0..9).map(|i| json!({"id": i.to_string()})).collect();
    let body = json!({
        "paging": { "currentToken": "tok1", "totalCount": 10 },
        "data": data
    });

    assert_eq!(
        next_page_token_from_value(&body, Some("tok0")),
        Some("tok1".to_string())
    );
}

#[test]
fn test_current_token_all_received() {
    let data: Vec<_> = (0..9).map(|i| json!({"id": i.to_string()})).collect();
    let body = json!({
        "paging": { "currentToken": "tok1", "totalCount": 9 },
        "data": data
    });

    assert_eq!(next_page_token_from_value(&body, Some("tok0")), None);
}

#[test]
fn test_total_count_zero_is_terminal() {
    let body = json!({
        "paging": { "currentToken": "tok1", "totalCount": 0 },
        "data": []
    });

    assert_eq!(next_page_token_from_value(&body, None), None);
}

#[test]
fn test_current_token_missing_total_count() {
    // Missing totalCount counts as 0, so the first page is the last
    let body = json!({
        "paging": { "currentToken": "tok1" },
        "data": [{"id": "1"}]
    });

    assert_eq!(next_page_token_from_value(&body, None), None);
}

// ============================================================================
// Terminal envelopes
// ============================================================================

#[test]
fn test_empty_body() {
    assert_eq!(next_page_token_from_value(&json!({}), Some("tokX")), None);
}

#[test]
fn test_empty_paging_object() {
    let body = json!({ "paging": {}, "data": [{"id": "1"}] });
    assert_eq!(next_page_token_from_value(&body, None), None);
}

#[test]
fn test_unparseable_body_is_terminal() {
    assert_eq!(next_page_token("<html>502 Bad Gateway</html>", None), None);
    assert_eq!(next_page_token("", Some("tok0")), None);
}

#[test]
fn test_raw_body_with_paging() {
    let body = r#"{"paging":{"_links":{"next":{"href":"?token=raw1"}}},"data":[]}"#;
    assert_eq!(next_page_token(body, None), Some("raw1".to_string()));
}
