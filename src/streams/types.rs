//! Stream configuration types

use crate::config::TapConfig;
use serde_json::Value;

/// Declarative description of one API endpoint
#[derive(Debug, Clone)]
pub struct StreamConfig {
    /// Unique stream name
    pub name: &'static str,
    /// API endpoint path, relative to the base URL
    pub path: &'static str,
    /// Primary key fields
    pub primary_keys: &'static [&'static str],
    /// Field used to order/filter incremental extraction
    pub replication_key: Option<&'static str>,
    /// Static JSON schema for the stream's records
    pub schema: Value,
}

impl StreamConfig {
    /// Query parameters for one page request
    ///
    /// `next_page_token` carries the cursor from the previous response;
    /// absent on the first request.
    pub fn url_params(
        &self,
        config: &TapConfig,
        next_page_token: Option<&str>,
    ) -> Vec<(String, String)> {
        let mut params = Vec::new();

        if let Some(token) = next_page_token {
            params.push(("token".to_string(), token.to_string()));
        }

        if let Some(start_date) = &config.start_date {
            params.push(("after".to_string(), start_date.clone()));
        }

        if let Some(replication_key) = self.replication_key {
            params.push(("sort".to_string(), "asc".to_string()));
            params.push(("order_by".to_string(), replication_key.to_string()));
        }

        params
    }
}
