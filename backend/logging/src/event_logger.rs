//! Request Event Logger
//!
//! One structured event per relay step (received, completed, failed),
//! emitted through `tracing` under the `request_events` target.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{error, info};

use crate::redact::redact_sensitive_data;

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RequestEvent {
    Received {
        section: String,
        image_bytes: usize,
        mime_type: String,
    },
    Completed {
        section: String,
        provider: String,
        model: String,
        text_chars: usize,
        latency_ms: u64,
    },
    Failed {
        section: String,
        error_msg: String,
    },
}

#[derive(Debug, Serialize)]
pub struct EventLogEntry {
    pub request_id: String,
    pub timestamp: DateTime<Utc>,
    pub event: RequestEvent,
}

pub struct EventLogger;

impl EventLogger {
    /// Log a request event, redacting error text first.
    pub fn log_event(request_id: &str, mut event: RequestEvent) {
        if let RequestEvent::Failed { error_msg, .. } = &mut event {
            *error_msg = redact_sensitive_data(error_msg);
        }

        let failed = matches!(event, RequestEvent::Failed { .. });
        let entry = EventLogEntry {
            request_id: request_id.into(),
            timestamp: Utc::now(),
            event,
        };
        let json = serde_json::to_string(&entry).unwrap_or_default();

        if failed {
            error!(target: "request_events", request_id = %entry.request_id, event = %json, "Image processing failed");
        } else {
            info!(target: "request_events", request_id = %entry.request_id, event = %json, "Request event");
        }
    }
}
