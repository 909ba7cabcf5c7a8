//! CLI runner - executes commands

use crate::auth::{Credentials, TokenManager};
use crate::cli::commands::{Cli, Commands, OutputFormat};
use crate::config::TapConfig;
use crate::engine::{Message, SyncEngine};
use crate::error::{Error, Result};
use crate::http::ApiClient;
use crate::streams::all_streams;
use chrono::Utc;
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Instant;

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        match &self.cli.command {
            Commands::Check { config_json } => self.check(config_json.as_deref()).await,
            Commands::Discover => self.discover(),
            Commands::Read {
                streams,
                config_json,
                max_records,
            } => {
                self.read(streams.as_deref(), config_json.as_deref(), *max_records)
                    .await
            }
            Commands::Streams => self.streams(),
        }
    }

    /// Load and validate configuration
    fn load_config(&self, inline: Option<&str>) -> Result<TapConfig> {
        // Inline config takes precedence
        let config = if let Some(json_str) = inline {
            TapConfig::from_json(json_str)?
        } else if let Some(path) = &self.cli.config {
            TapConfig::from_file(path)?
        } else {
            return Err(Error::config(
                "Config not specified (use -C file or --config-json)",
            ));
        };
        config.validate()?;
        Ok(config)
    }

    /// Build the shared token manager from config
    fn build_token_manager(config: &TapConfig) -> Arc<TokenManager> {
        Arc::new(TokenManager::new(
            Credentials::new(
                &config.client_id,
                &config.client_secret,
                &config.auth_endpoint,
            ),
            config.default_expires_in,
        ))
    }

    /// Check credentials
    async fn check(&self, config_json: Option<&str>) -> Result<()> {
        let config = self.load_config(config_json)?;

        self.output_message(&json!({
            "type": "LOG",
            "log": {
                "level": "INFO",
                "message": format!("Checking connection to {}", config.auth_endpoint)
            }
        }));

        let token_manager = Self::build_token_manager(&config);
        match token_manager.get_token().await {
            Ok(_) => {
                self.output_message(&json!({
                    "type": "CONNECTION_STATUS",
                    "connectionStatus": {
                        "status": "SUCCEEDED",
                        "message": "Connection successful"
                    }
                }));
            }
            Err(e) => {
                self.output_message(&json!({
                    "type": "CONNECTION_STATUS",
                    "connectionStatus": {
                        "status": "FAILED",
                        "message": format!("Connection failed: {e}")
                    }
                }));
            }
        }

        Ok(())
    }

    /// Discover streams
    fn discover(&self) -> Result<()> {
        let mut streams = Vec::new();

        for stream in all_streams() {
            let primary_key: Vec<Vec<&str>> =
                stream.primary_keys.iter().map(|k| vec![*k]).collect();

            streams.push(json!({
                "name": stream.name,
                "json_schema": stream.schema,
                "supported_sync_modes": ["full_refresh", "incremental"],
                "source_defined_cursor": stream.replication_key.is_some(),
                "default_cursor_field": stream.replication_key.map(|f| vec![f]),
                "source_defined_primary_key": primary_key
            }));
        }

        self.output_message(&json!({
            "type": "CATALOG",
            "catalog": {
                "streams": streams
            }
        }));

        Ok(())
    }

    /// Read data
    async fn read(
        &self,
        streams: Option<&str>,
        config_json: Option<&str>,
        max_records: Option<usize>,
    ) -> Result<()> {
        let sync_start = Instant::now();
        let config = self.load_config(config_json)?;

        // Parse streams filter
        let stream_filter: Option<Vec<&str>> = streams.map(|s| s.split(',').collect());

        let token_manager = Self::build_token_manager(&config);
        let client = ApiClient::new(&config, token_manager)?;

        let mut engine = SyncEngine::new(client, config);
        if let Some(max) = max_records {
            engine = engine.with_max_records(max);
        }

        // Track per-stream statistics
        let mut stream_results: Vec<Value> = Vec::new();
        let mut total_records = 0usize;

        for stream in all_streams() {
            if let Some(ref filter) = stream_filter {
                if !filter.contains(&stream.name) {
                    continue;
                }
            }

            let stream_start = Instant::now();
            let records_before = engine.stats().records_synced;

            match engine.sync_stream(&stream).await {
                Ok(messages) => {
                    for msg in &messages {
                        self.output_engine_message(msg);
                    }

                    let stream_records = engine.stats().records_synced - records_before;
                    total_records += stream_records;

                    stream_results.push(json!({
                        "stream": stream.name,
                        "status": "SUCCESS",
                        "records_synced": stream_records,
                        "duration_ms": stream_start.elapsed().as_millis() as u64
                    }));
                }
                Err(e) => {
                    self.output_message(&json!({
                        "type": "LOG",
                        "log": {
                            "level": "ERROR",
                            "message": format!("Error syncing stream {}: {}", stream.name, e)
                        }
                    }));

                    stream_results.push(json!({
                        "stream": stream.name,
                        "status": "FAILED",
                        "error": e.to_string(),
                        "records_synced": engine.stats().records_synced - records_before,
                        "duration_ms": stream_start.elapsed().as_millis() as u64
                    }));
                }
            }
        }

        let successful_streams = stream_results
            .iter()
            .filter(|r| r["status"] == "SUCCESS")
            .count();
        let failed_streams = stream_results
            .iter()
            .filter(|r| r["status"] == "FAILED")
            .count();

        self.output_message(&json!({
            "type": "SYNC_SUMMARY",
            "summary": {
                "status": if failed_streams == 0 { "SUCCEEDED" } else if successful_streams == 0 { "FAILED" } else { "PARTIAL" },
                "total_records": total_records,
                "total_streams": stream_results.len(),
                "successful_streams": successful_streams,
                "failed_streams": failed_streams,
                "duration_ms": sync_start.elapsed().as_millis() as u64,
                "streams": stream_results
            }
        }));

        Ok(())
    }

    /// List available streams (lightweight, no schemas)
    fn streams(&self) -> Result<()> {
        let stream_names: Vec<&str> = all_streams().iter().map(|s| s.name).collect();

        self.output_message(&json!({
            "type": "STREAMS",
            "streams": stream_names
        }));

        Ok(())
    }

    /// Output a message
    fn output_message(&self, msg: &Value) {
        match self.cli.format {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string(msg).unwrap_or_default());
            }
            OutputFormat::Pretty => {
                println!("{}", serde_json::to_string_pretty(msg).unwrap_or_default());
            }
        }
    }

    /// Output an engine message
    fn output_engine_message(&self, msg: &Message) {
        match msg {
            Message::Record { stream, data } => {
                self.output_message(&json!({
                    "type": "RECORD",
                    "record": {
                        "stream": stream,
                        "data": data,
                        "emitted_at": Utc::now().timestamp_millis()
                    }
                }));
            }
            Message::State { stream, data } => {
                self.output_message(&json!({
                    "type": "STATE",
                    "state": {
                        "type": "STREAM",
                        "stream": {
                            "stream_descriptor": {
                                "name": stream
                            },
                            "stream_state": data
                        }
                    }
                }));
            }
            Message::Log { level, message } => {
                if !self.cli.verbose && *level == crate::engine::LogLevel::Debug {
                    return;
                }
                self.output_message(&json!({
                    "type": "LOG",
                    "log": {
                        "level": level.as_str(),
                        "message": message
                    }
                }));
            }
        }
    }
}
