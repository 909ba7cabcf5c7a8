//! Error types for tap-cvent
//!
//! All public APIs return `Result<T, Error>` where Error is defined here.
//! The three `Auth*` variants mirror the outcome classification of the
//! token refresh cycle: transport failure, non-2xx status, and malformed
//! success body. Auth errors are fatal to the sync; pagination parse
//! failures are handled as end-of-stream and never surface here.

use thiserror::Error;

/// The main error type for tap-cvent
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Missing required config field: {field}")]
    MissingConfigField { field: String },

    #[error("Invalid config value for '{field}': {message}")]
    InvalidConfigValue { field: String, message: String },

    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    // ============================================================================
    // Authentication Errors
    // ============================================================================
    #[error("Failed to connect to auth endpoint: {source}")]
    AuthConnection {
        #[source]
        source: reqwest::Error,
    },

    #[error("OAuth login failed (HTTP {status}): {detail}")]
    AuthHttp { status: u16, detail: String },

    #[error("Invalid response from auth endpoint: {message}")]
    AuthResponse { message: String },

    // ============================================================================
    // HTTP Errors
    // ============================================================================
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    // ============================================================================
    // Data Processing Errors
    // ============================================================================
    #[error("Failed to extract records from '{path}': {message}")]
    RecordExtraction { path: String, message: String },

    // ============================================================================
    // I/O Errors
    // ============================================================================
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a missing field error
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingConfigField {
            field: field.into(),
        }
    }

    /// Create an invalid config value error
    pub fn invalid_value(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidConfigValue {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create an auth response error (2xx with malformed/incomplete body)
    pub fn auth_response(message: impl Into<String>) -> Self {
        Self::AuthResponse {
            message: message.into(),
        }
    }

    /// Create an HTTP status error
    pub fn http_status(status: u16, body: impl Into<String>) -> Self {
        Self::HttpStatus {
            status,
            body: body.into(),
        }
    }

    /// Create a record extraction error
    pub fn record_extraction(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::RecordExtraction {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Check if this error came from the auth cycle
    pub fn is_auth(&self) -> bool {
        matches!(
            self,
            Error::AuthConnection { .. } | Error::AuthHttp { .. } | Error::AuthResponse { .. }
        )
    }
}

/// Result type alias for tap-cvent
pub type Result<T> = std::result::Result<T, Error>;
