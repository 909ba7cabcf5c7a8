//! # tap-cvent
//!
//! A data extraction tap for the Cvent event-management REST API.
//!
//! ## Features
//!
//! - **OAuth2 client credentials**: Cached bearer token with mutex-guarded
//!   refresh shared across all streams
//! - **Token pagination**: Follows `_links.next.href` cursors with a
//!   `currentToken`/`totalCount` fallback
//! - **Incremental sync**: Bookmarks the `lastModified` replication key
//! - **JSON-lines output**: RECORD/STATE/LOG messages on stdout
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use tap_cvent::auth::{Credentials, TokenManager};
//! use tap_cvent::config::TapConfig;
//! use tap_cvent::engine::SyncEngine;
//! use tap_cvent::http::ApiClient;
//! use tap_cvent::streams::all_streams;
//! use tap_cvent::Result;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let config = TapConfig::from_file("config.json")?;
//!     config.validate()?;
//!
//!     let token_manager = Arc::new(TokenManager::new(
//!         Credentials::new(&config.client_id, &config.client_secret, &config.auth_endpoint),
//!         config.default_expires_in,
//!     ));
//!     let client = ApiClient::new(&config, token_manager)?;
//!
//!     let mut engine = SyncEngine::new(client, config);
//!     for message in engine.sync_all(&all_streams()).await? {
//!         // Process messages
//!     }
//!
//!     Ok(())
//! }
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::cast_possible_truncation)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types for the tap
pub mod error;

/// Tap configuration
pub mod config;

/// OAuth2 client-credentials token management
pub mod auth;

/// Pagination token resolution
pub mod pagination;

/// Stream definitions
pub mod streams;

/// API client for record requests
pub mod http;

/// Main execution engine
pub mod engine;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use config::TapConfig;
pub use error::{Error, Result};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
