//! Integration tests using mock HTTP server
//!
//! Tests the full end-to-end flow: config → OAuth token → paged record
//! extraction → messages

use serde_json::json;
use std::sync::Arc;
use tap_cvent::auth::{Credentials, TokenManager};
use tap_cvent::config::TapConfig;
use tap_cvent::engine::{Message, SyncEngine};
use tap_cvent::error::Error;
use tap_cvent::http::ApiClient;
use tap_cvent::streams::{admission_items, all_streams};
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn config_for(server: &MockServer) -> TapConfig {
    let config = TapConfig::from_json(&format!(
        r#"{{
            "api_url": "{}",
            "auth_endpoint": "{}/ea/oauth2/token",
            "client_id": "integration-client",
            "client_secret": "integration-secret",
            "start_date": "2024-01-01T00:00:00Z"
        }}"#,
        server.uri(),
        server.uri()
    ))
    .unwrap();
    config.validate().unwrap();
    config
}

fn engine_for(server: &MockServer) -> SyncEngine {
    let config = config_for(server);
    let token_manager = Arc::new(TokenManager::new(
        Credentials::new(
            &config.client_id,
            &config.client_secret,
            &config.auth_endpoint,
        ),
        config.default_expires_in,
    ));
    let client = ApiClient::new(&config, token_manager).unwrap();
    SyncEngine::new(client, config)
}

// ============================================================================
// End-to-end sync tests
// ============================================================================

#[tokio::test]
async fn test_end_to_end_two_page_sync() {
    let mock_server = MockServer::start().await;

    // One token fetch serves the whole sync
    Mock::given(method("POST"))
        .and(path("/ea/oauth2/token"))
        .and(query_param("grant_type", "client_credentials"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "e2e-token",
            "expires_in": 3600
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/admission-items"))
        .and(header("Authorization", "Bearer e2e-token"))
        .and(query_param("token", "next-page"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [
                {"id": "item-3", "name": "VIP Pass", "lastModified": "2024-06-01T12:00:00Z"}
            ],
            "paging": {"currentToken": "next-page", "totalCount": 1}
        })))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/admission-items"))
        .and(header("Authorization", "Bearer e2e-token"))
        .and(query_param("after", "2024-01-01T00:00:00Z"))
        .and(query_param("sort", "asc"))
        .and(query_param("order_by", "lastModified"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [
                {"id": "item-1", "name": "General", "lastModified": "2024-02-01T12:00:00Z"},
                {"id": "item-2", "name": "Student", "lastModified": "2024-03-01T12:00:00Z"}
            ],
            "paging": {
                "_links": {
                    "next": {"href": "https://api/admission-items?token=next-page&limit=2"}
                }
            }
        })))
        .mount(&mock_server)
        .await;

    let mut engine = engine_for(&mock_server);
    let messages = engine.sync_stream(&admission_items()).await.unwrap();

    let records: Vec<_> = messages
        .iter()
        .filter_map(|m| match m {
            Message::Record { data, .. } => Some(data),
            _ => None,
        })
        .collect();
    assert_eq!(records.len(), 3);
    assert_eq!(records[0]["id"], "item-1");
    assert_eq!(records[2]["id"], "item-3");

    // Bookmark covers the furthest page
    let state = messages.iter().find(|m| m.is_state()).unwrap();
    match state {
        Message::State { data, .. } => {
            assert_eq!(data["lastModified"], "2024-06-01T12:00:00Z");
        }
        _ => unreachable!(),
    }

    assert_eq!(engine.stats().pages_fetched, 2);
    assert_eq!(engine.stats().records_synced, 3);
}

#[tokio::test]
async fn test_sync_all_streams() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/ea/oauth2/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "e2e-token",
            "expires_in": 3600
        })))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{"id": "only"}],
            "paging": {}
        })))
        .mount(&mock_server)
        .await;

    let mut engine = engine_for(&mock_server);
    let streams = all_streams();
    let messages = engine.sync_all(&streams).await.unwrap();

    assert_eq!(
        messages.iter().filter(|m| m.is_record()).count(),
        streams.len()
    );
}

// ============================================================================
// Auth failure tests
// ============================================================================

#[tokio::test]
async fn test_auth_failure_aborts_sync() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/ea/oauth2/token"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({"error": "invalid_client"})),
        )
        .mount(&mock_server)
        .await;

    let mut engine = engine_for(&mock_server);
    let err = engine.sync_stream(&admission_items()).await.unwrap_err();

    match err {
        Error::AuthHttp { status, detail } => {
            assert_eq!(status, 401);
            assert!(detail.contains("invalid_client"));
        }
        other => panic!("Expected AuthHttp, got {other:?}"),
    }
}

#[tokio::test]
async fn test_auth_sends_basic_credentials() {
    let mock_server = MockServer::start().await;

    // base64("integration-client:integration-secret")
    Mock::given(method("POST"))
        .and(path("/ea/oauth2/token"))
        .and(header(
            "Authorization",
            "Basic aW50ZWdyYXRpb24tY2xpZW50OmludGVncmF0aW9uLXNlY3JldA==",
        ))
        .and(query_param("grant_type", "client_credentials"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "e2e-token",
            "expires_in": 3600
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [],
            "paging": {}
        })))
        .mount(&mock_server)
        .await;

    let mut engine = engine_for(&mock_server);
    engine.sync_stream(&admission_items()).await.unwrap();
}
