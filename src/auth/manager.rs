//! Token manager implementation
//!
//! Handles the client-credentials exchange and token caching. The cache is
//! guarded by a `tokio::sync::RwLock` with a double-check after acquiring
//! the write lock, so concurrent callers trigger at most one refresh and
//! reuse its result.

use super::types::{Credentials, Token};
use crate::error::{Error, Result};
use base64::Engine as _;
use chrono::Utc;
use reqwest::Client;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::{debug, info};

/// Timeout for token requests
const AUTH_TIMEOUT: Duration = Duration::from_secs(60);

/// Acquires and caches an OAuth2 bearer token
pub struct TokenManager {
    /// Credential set, immutable for the process lifetime
    credentials: Credentials,
    /// Fallback token lifetime when the server omits `expires_in`
    default_expires_in: Option<i64>,
    /// Cached token
    cached: Arc<RwLock<Option<Token>>>,
    /// HTTP client for token requests
    http_client: Client,
}

impl TokenManager {
    /// Create a new token manager
    pub fn new(credentials: Credentials, default_expires_in: Option<i64>) -> Self {
        Self {
            credentials,
            default_expires_in,
            cached: Arc::new(RwLock::new(None)),
            http_client: Client::new(),
        }
    }

    /// Create a token manager with a custom HTTP client
    pub fn with_client(
        credentials: Credentials,
        default_expires_in: Option<i64>,
        http_client: Client,
    ) -> Self {
        Self {
            credentials,
            default_expires_in,
            cached: Arc::new(RwLock::new(None)),
            http_client,
        }
    }

    /// Get a valid token, refreshing synchronously if necessary
    pub async fn get_token(&self) -> Result<Token> {
        {
            let cached = self.cached.read().await;
            if let Some(token) = cached.as_ref() {
                if token.is_valid() {
                    return Ok(token.clone());
                }
            }
        }

        // Refresh path is an exclusive critical section
        let mut cached = self.cached.write().await;

        // Double-check after acquiring the write lock (another task might
        // have refreshed while we waited)
        if let Some(token) = cached.as_ref() {
            if token.is_valid() {
                return Ok(token.clone());
            }
        }

        let new_token = self.fetch_token().await?;
        *cached = Some(new_token.clone());

        Ok(new_token)
    }

    /// Perform the client-credentials exchange
    async fn fetch_token(&self) -> Result<Token> {
        let request_time = Utc::now();

        let credentials = format!(
            "{}:{}",
            self.credentials.client_id, self.credentials.client_secret
        );
        let basic = base64::engine::general_purpose::STANDARD.encode(credentials);

        debug!(
            auth_endpoint = %self.credentials.auth_endpoint,
            "Requesting access token"
        );

        // grant_type goes in the query string, not the form body; the Cvent
        // token endpoint expects it there
        let response = self
            .http_client
            .post(&self.credentials.auth_endpoint)
            .query(&[("grant_type", "client_credentials")])
            .header("Authorization", format!("Basic {basic}"))
            .header("Content-Type", "application/x-www-form-urlencoded")
            .timeout(AUTH_TIMEOUT)
            .send()
            .await
            .map_err(|source| Error::AuthConnection { source })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|source| Error::AuthConnection { source })?;

        if !status.is_success() {
            // Best-effort detail: keep the body as JSON if it parses
            let detail = match serde_json::from_str::<Value>(&body) {
                Ok(json) => json.to_string(),
                Err(_) => body,
            };
            return Err(Error::AuthHttp {
                status: status.as_u16(),
                detail,
            });
        }

        let token_json: Value = serde_json::from_str(&body)
            .map_err(|e| Error::auth_response(format!("body is not valid JSON: {e}")))?;

        let access_token = token_json
            .get("access_token")
            .and_then(Value::as_str)
            .ok_or_else(|| Error::auth_response("no access_token in response"))?;

        let expires_in = token_json
            .get("expires_in")
            .and_then(Value::as_i64)
            .or(self.default_expires_in);
        if expires_in.is_none() {
            debug!(
                "No expires_in in auth response and no default configured; \
                 token treated as never expiring"
            );
        }

        info!("OAuth authorization attempt was successful");

        Ok(Token::new(access_token, expires_in, request_time))
    }

    /// Drop the cached token, forcing a refresh on the next call
    pub async fn clear_cache(&self) {
        let mut cached = self.cached.write().await;
        *cached = None;
    }
}

impl std::fmt::Debug for TokenManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenManager")
            .field("credentials", &self.credentials)
            .field("default_expires_in", &self.default_expires_in)
            .finish_non_exhaustive()
    }
}
