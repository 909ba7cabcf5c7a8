//! OAuth2 client-credentials authentication
//!
//! The `TokenManager` acquires and caches a bearer token for the Cvent API.
//! One manager is created per credential set and shared (via `Arc`) by every
//! stream client, so all streams reuse the same token and refresh cycle.

mod manager;
mod types;

pub use manager::TokenManager;
pub use types::{Credentials, Token};
