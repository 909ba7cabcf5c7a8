//! Execution engine
//!
//! The strict sequential extraction loop: get a valid token, fetch a page,
//! emit its records, resolve the next cursor, repeat until the resolver
//! signals completion. One HTTP call in flight at a time.

mod types;

pub use types::{LogLevel, Message, SyncStats};

use crate::config::TapConfig;
use crate::error::Result;
use crate::http::ApiClient;
use crate::pagination::next_page_token;
use crate::streams::StreamConfig;
use serde_json::Value;
use std::time::Instant;
use tracing::info;

/// Sync engine for orchestrating data extraction
pub struct SyncEngine {
    /// API client (carries the shared token manager)
    client: ApiClient,
    /// Tap configuration
    config: TapConfig,
    /// Maximum records per stream (0 = unlimited)
    max_records: usize,
    /// Statistics
    stats: SyncStats,
}

impl SyncEngine {
    /// Create a new sync engine
    pub fn new(client: ApiClient, config: TapConfig) -> Self {
        Self {
            client,
            config,
            max_records: 0,
            stats: SyncStats::default(),
        }
    }

    /// Cap the number of records synced per stream
    #[must_use]
    pub fn with_max_records(mut self, max: usize) -> Self {
        self.max_records = max;
        self
    }

    /// Get statistics
    pub fn stats(&self) -> &SyncStats {
        &self.stats
    }

    /// Sync a single stream
    ///
    /// Auth and HTTP errors abort the stream; a malformed pagination
    /// envelope merely ends it (treated as the last page).
    pub async fn sync_stream(&mut self, stream: &StreamConfig) -> Result<Vec<Message>> {
        let start = Instant::now();
        let mut messages = Vec::new();
        let mut records_emitted = 0usize;
        let mut page_count = 0usize;
        let mut cursor: Option<String> = None;
        let mut max_replication_value: Option<String> = None;

        info!(stream = stream.name, "Starting sync");
        messages.push(Message::info(format!(
            "Starting sync for stream: {}",
            stream.name
        )));

        loop {
            let page = self
                .client
                .fetch_page(stream, &self.config, cursor.as_deref())
                .await?;

            page_count += 1;
            self.stats.add_page();

            messages.push(Message::debug(format!(
                "Page {page_count}: fetched {} records",
                page.records.len()
            )));

            let before = records_emitted;
            for record in &page.records {
                if self.max_records > 0 && records_emitted >= self.max_records {
                    break;
                }
                if let Some(key) = stream.replication_key {
                    update_max(&mut max_replication_value, record, key);
                }
                messages.push(Message::record(stream.name, record.clone()));
                records_emitted += 1;
            }
            self.stats.add_records(records_emitted - before);

            if self.max_records > 0 && records_emitted >= self.max_records {
                break;
            }

            match next_page_token(&page.body, cursor.as_deref()) {
                Some(token) => cursor = Some(token),
                None => break,
            }
        }

        // Bookmark the furthest replication-key value we saw
        if let (Some(key), Some(value)) = (stream.replication_key, &max_replication_value) {
            messages.push(Message::state(
                stream.name,
                serde_json::json!({ key: value }),
            ));
        }

        self.stats.add_stream();
        self.stats.set_duration(start.elapsed().as_millis() as u64);

        info!(
            stream = stream.name,
            records = records_emitted,
            pages = page_count,
            "Completed sync"
        );
        messages.push(Message::info(format!(
            "Completed sync for {}: {records_emitted} records in {page_count} pages",
            stream.name
        )));

        Ok(messages)
    }

    /// Sync every given stream in order
    pub async fn sync_all(&mut self, streams: &[StreamConfig]) -> Result<Vec<Message>> {
        let mut messages = Vec::new();
        for stream in streams {
            messages.extend(self.sync_stream(stream).await?);
        }
        Ok(messages)
    }
}

/// Track the maximum string value of `key` across records
fn update_max(current: &mut Option<String>, record: &Value, key: &str) {
    let Some(value) = record.get(key).and_then(Value::as_str) else {
        return;
    };
    match current {
        Some(existing) if existing.as_str() >= value => {}
        _ => *current = Some(value.to_string()),
    }
}
