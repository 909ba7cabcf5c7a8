//! API client for record requests
//!
//! Thin wrapper around `reqwest` that attaches the bearer token from the
//! shared `TokenManager`, builds the per-page query string, and extracts
//! the `data` array from the response envelope.

mod client;

pub use client::{ApiClient, Page};
