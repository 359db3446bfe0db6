//! Telemetry and structured logging for PaperForge.
//!
//! Handles subscriber setup, secret redaction, and per-request event logging.

pub mod event_logger;
pub mod logger;
pub mod redact;

pub use event_logger::{EventLogEntry, EventLogger, RequestEvent};
pub use logger::init_logger;
pub use redact::redact_sensitive_data;
