//! Structured Logger
//!
//! Wraps `tracing` with a console layer (plain or JSON), an optional
//! daily-rolling NDJSON file, and `RUST_LOG`-based level control.

use std::path::Path;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize the global structured logger.
///
/// `level` is used when `RUST_LOG` is unset. With `log_dir`, events are also
/// written to `paperforge.log.YYYY-MM-DD` in that directory.
pub fn init_logger(level: &str, log_dir: Option<&Path>, json_console: bool) {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let file_layer = log_dir.map(|dir| {
        let file_appender = RollingFileAppender::new(Rotation::DAILY, dir, "paperforge.log");
        fmt::layer()
            .json()
            .with_writer(file_appender)
            .with_ansi(false)
    });

    let json_layer = json_console.then(|| {
        fmt::layer()
            .json()
            .with_writer(std::io::stdout)
            .with_target(false)
    });

    let console_layer = (!json_console).then(|| {
        fmt::layer()
            .with_writer(std::io::stdout)
            .with_target(false)
            .with_ansi(true)
    });

    // A second init (tests, embedded use) is ignored.
    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer)
        .with(json_layer)
        .with(file_layer)
        .try_init();
}
