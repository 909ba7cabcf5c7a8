//! Tap configuration
//!
//! Loaded from a JSON file or an inline JSON string (inline takes
//! precedence). Required fields are checked by `validate()` rather than at
//! deserialization time so that a single error names the missing field.

use crate::error::{Error, Result};
use serde::Deserialize;
use std::fmt;
use std::path::Path;

/// Default Cvent API base URL
pub const DEFAULT_API_URL: &str = "https://api-platform.cvent.com";

/// Tap configuration
#[derive(Clone, Deserialize)]
pub struct TapConfig {
    /// Base URL for API requests
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// OAuth2 token endpoint URL
    #[serde(default)]
    pub auth_endpoint: String,

    /// OAuth2 client ID (secret)
    #[serde(default)]
    pub client_id: String,

    /// OAuth2 client secret (secret)
    #[serde(default)]
    pub client_secret: String,

    /// ISO8601 start-date filter, sent as the `after` query parameter
    #[serde(default)]
    pub start_date: Option<String>,

    /// Custom User-Agent header
    #[serde(default)]
    pub user_agent: Option<String>,

    /// Fallback token lifetime in seconds when the auth server omits
    /// `expires_in`. Absent means tokens without `expires_in` never expire.
    #[serde(default)]
    pub default_expires_in: Option<i64>,
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

impl TapConfig {
    /// Load configuration from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path.as_ref())
            .map_err(|e| Error::config(format!("Failed to read config file: {e}")))?;
        Self::from_json(&contents)
    }

    /// Load configuration from an inline JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| Error::config(format!("Invalid config JSON: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Check required fields and value formats
    pub fn validate(&self) -> Result<()> {
        if self.auth_endpoint.is_empty() {
            return Err(Error::missing_field("auth_endpoint"));
        }
        if self.client_id.is_empty() {
            return Err(Error::missing_field("client_id"));
        }
        if self.client_secret.is_empty() {
            return Err(Error::missing_field("client_secret"));
        }

        url::Url::parse(&self.api_url)
            .map_err(|e| Error::invalid_value("api_url", e.to_string()))?;
        url::Url::parse(&self.auth_endpoint)
            .map_err(|e| Error::invalid_value("auth_endpoint", e.to_string()))?;

        if let Some(start_date) = &self.start_date {
            parse_start_date(start_date)
                .map_err(|e| Error::invalid_value("start_date", e))?;
        }

        Ok(())
    }
}

/// Accept full RFC3339 timestamps or bare dates
fn parse_start_date(value: &str) -> std::result::Result<(), String> {
    if chrono::DateTime::parse_from_rfc3339(value).is_ok() {
        return Ok(());
    }
    chrono::NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map(|_| ())
        .map_err(|e| format!("not an ISO8601 date: {e}"))
}

// Secrets must not leak through Debug output
impl fmt::Debug for TapConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TapConfig")
            .field("api_url", &self.api_url)
            .field("auth_endpoint", &self.auth_endpoint)
            .field("client_id", &"***")
            .field("client_secret", &"***")
            .field("start_date", &self.start_date)
            .field("user_agent", &self.user_agent)
            .field("default_expires_in", &self.default_expires_in)
            .finish()
    }
}
