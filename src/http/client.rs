//! HTTP client implementation

use crate::auth::TokenManager;
use crate::config::TapConfig;
use crate::error::{Error, Result};
use crate::streams::StreamConfig;
use reqwest::Client;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, warn};

/// One fetched page of records
#[derive(Debug, Clone)]
pub struct Page {
    /// Raw response body, kept for the pagination resolver
    pub body: String,
    /// Records extracted from the `data` array
    pub records: Vec<Value>,
}

/// Client for the Cvent record API
///
/// Every stream shares one `ApiClient`, and through it one `TokenManager`,
/// so all requests in a sync reuse the same token and refresh cycle.
pub struct ApiClient {
    client: Client,
    base_url: String,
    token_manager: Arc<TokenManager>,
}

impl ApiClient {
    /// Create a new API client
    pub fn new(config: &TapConfig, token_manager: Arc<TokenManager>) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(user_agent) = &config.user_agent {
            builder = builder.user_agent(user_agent);
        }
        let client = builder.build().map_err(Error::Http)?;

        Ok(Self {
            client,
            base_url: config.api_url.trim_end_matches('/').to_string(),
            token_manager,
        })
    }

    /// The shared token manager
    pub fn token_manager(&self) -> &Arc<TokenManager> {
        &self.token_manager
    }

    /// Fetch one page of records for a stream
    pub async fn fetch_page(
        &self,
        stream: &StreamConfig,
        config: &TapConfig,
        next_page_token: Option<&str>,
    ) -> Result<Page> {
        let token = self.token_manager.get_token().await?;
        let url = format!("{}/{}", self.base_url, stream.path);
        let params = stream.url_params(config, next_page_token);

        debug!(stream = stream.name, url = %url, "Fetching page");

        let response = self
            .client
            .get(&url)
            .query(&params)
            .bearer_auth(&token.access_token)
            .send()
            .await
            .map_err(Error::Http)?;

        let status = response.status();
        let body = response.text().await.map_err(Error::Http)?;

        if !status.is_success() {
            return Err(Error::HttpStatus {
                status: status.as_u16(),
                body,
            });
        }

        let records = extract_records(&body)?;
        Ok(Page { body, records })
    }
}

/// Extract the `data` array from a response body
///
/// Numbers survive with full precision thanks to serde_json's
/// arbitrary_precision parsing. A missing `data` key yields zero records
/// (some terminal pages omit it); a `data` that is not an array is an
/// envelope we don't understand and fails the stream.
fn extract_records(body: &str) -> Result<Vec<Value>> {
    let envelope: Value = serde_json::from_str(body)
        .map_err(|e| Error::record_extraction("data", format!("body is not valid JSON: {e}")))?;

    match envelope.get("data") {
        None => {
            warn!("Response has no 'data' array");
            Ok(Vec::new())
        }
        Some(Value::Array(records)) => Ok(records.clone()),
        Some(other) => Err(Error::record_extraction(
            "data",
            format!("expected an array, got {}", value_kind(other)),
        )),
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod extract_tests {
    use super::*;

    #[test]
    fn test_extract_records() {
        let body = r#"{"data":[{"id":"a"},{"id":"b"}],"paging":{}}"#;
        let records = extract_records(body).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0]["id"], "a");
    }

    #[test]
    fn test_extract_records_missing_data() {
        let records = extract_records(r#"{"paging":{}}"#).unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn test_extract_records_data_not_array() {
        let err = extract_records(r#"{"data":{"id":"a"}}"#).unwrap_err();
        assert!(matches!(err, Error::RecordExtraction { .. }));
    }

    #[test]
    fn test_extract_preserves_decimal_precision() {
        // 1.10 would come back as 1.1 through f64; arbitrary_precision
        // keeps the source text
        let body = r#"{"data":[{"price":1.10,"count":9007199254740993}]}"#;
        let records = extract_records(body).unwrap();
        let serialized = serde_json::to_string(&records[0]).unwrap();
        assert!(serialized.contains("1.10"));
        assert!(serialized.contains("9007199254740993"));
    }
}
