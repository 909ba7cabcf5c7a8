//! Stream definitions
//!
//! Each endpoint is described by a plain `StreamConfig` consumed by the
//! generic fetch/paginate loop in the engine — one struct per endpoint
//! instead of a subclass per endpoint.

mod types;

pub use types::StreamConfig;

use serde_json::json;

/// Name of the admission-items stream
pub const ADMISSION_ITEMS: &str = "admission_items";

/// The Cvent Admission Items stream
pub fn admission_items() -> StreamConfig {
    StreamConfig {
        name: ADMISSION_ITEMS,
        path: "admission-items",
        primary_keys: &["id"],
        replication_key: Some("lastModified"),
        schema: json!({
            "type": "object",
            "properties": {
                "id": { "type": "string" },
                "name": { "type": ["string", "null"] },
                "code": { "type": ["string", "null"] },
                "lastModified": { "type": ["string", "null"], "format": "date-time" },
                "created": { "type": ["string", "null"], "format": "date-time" },
                "allowOptionalSessions": { "type": ["boolean", "null"] },
                "limitedAvailableSessions": {
                    "type": ["array", "null"],
                    "items": { "type": "string" },
                    "description": "List of limited available sessions"
                },
                "event": {
                    "type": ["object", "null"],
                    "properties": {
                        "id": { "type": "string" },
                        "languages": {
                            "type": "array",
                            "items": { "type": "string" }
                        }
                    },
                    "description": "Event details"
                },
                "includedSessions": {
                    "type": ["array", "null"],
                    "items": { "type": "string" },
                    "description": "List of included sessions"
                }
            },
            "required": ["id"]
        }),
    }
}

/// All streams this tap knows about
pub fn all_streams() -> Vec<StreamConfig> {
    vec![admission_items()]
}
