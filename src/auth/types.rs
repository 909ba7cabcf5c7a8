//! Auth types
//!
//! Credentials are supplied once at process start and stay immutable for
//! the process lifetime. A `Token` is only ever constructed from a 2xx auth
//! response that carried an `access_token`.

use chrono::{DateTime, Duration, Utc};
use std::fmt;

/// OAuth2 client credentials and token endpoint
#[derive(Clone)]
pub struct Credentials {
    /// OAuth2 client ID
    pub client_id: String,
    /// OAuth2 client secret
    pub client_secret: String,
    /// Token endpoint URL
    pub auth_endpoint: String,
}

impl Credentials {
    /// Create a new credential set
    pub fn new(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        auth_endpoint: impl Into<String>,
    ) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            auth_endpoint: auth_endpoint.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("client_id", &"***")
            .field("client_secret", &"***")
            .field("auth_endpoint", &self.auth_endpoint)
            .finish()
    }
}

/// A cached bearer token
#[derive(Debug, Clone)]
pub struct Token {
    /// The access token value
    pub access_token: String,
    /// When the token expires; `None` means it never expires
    pub expires_at: Option<DateTime<Utc>>,
    /// When the token request was started
    pub issued_at: DateTime<Utc>,
}

impl Token {
    /// Create a token from an auth response
    ///
    /// `expires_in` is the lifetime in seconds as reported by the auth
    /// server (or the configured fallback). `None` produces a token that
    /// is treated as never expiring.
    pub fn new(
        access_token: impl Into<String>,
        expires_in: Option<i64>,
        issued_at: DateTime<Utc>,
    ) -> Self {
        Self {
            access_token: access_token.into(),
            expires_at: expires_in.map(|secs| issued_at + Duration::seconds(secs)),
            issued_at,
        }
    }

    /// A token is valid iff it has no expiry or the expiry is in the future
    pub fn is_valid(&self) -> bool {
        match self.expires_at {
            Some(expires_at) => Utc::now() < expires_at,
            None => true,
        }
    }
}

#[cfg(test)]
mod type_tests {
    use super::*;

    #[test]
    fn test_token_not_expired() {
        let token = Token::new("test", Some(3600), Utc::now());
        assert!(token.is_valid());
    }

    #[test]
    fn test_token_expired() {
        let token = Token::new("test", Some(-100), Utc::now());
        assert!(!token.is_valid());
    }

    #[test]
    fn test_token_no_expiration() {
        let token = Token::new("test", None, Utc::now());
        assert!(token.is_valid());
        assert!(token.expires_at.is_none());
    }

    #[test]
    fn test_credentials_debug_masks_secrets() {
        let creds = Credentials::new("id", "secret", "https://auth.example.com");
        let debug = format!("{creds:?}");
        assert!(!debug.contains("secret"));
        assert!(debug.contains("https://auth.example.com"));
    }
}
