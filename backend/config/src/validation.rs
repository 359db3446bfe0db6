//! Config validation with field paths in every message.
//!
//! Errors never stop the relay: [`repair`] replaces each invalid value with a
//! usable one after the report is logged.

use paperforge_core::{ProviderKind, DEFAULT_MAX_UPLOAD_BYTES};
use thiserror::Error;

use crate::schema::PaperForgeConfig;

/// A config validation finding with field path and message.
#[derive(Debug, Error)]
#[error("Config validation error at '{path}': {message}")]
pub struct ConfigValidationError {
    pub path: String,
    pub message: String,
}

/// All findings from one validation pass.
#[derive(Debug, Default)]
pub struct ValidationReport {
    pub errors: Vec<ConfigValidationError>,
    pub warnings: Vec<ConfigValidationError>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    fn error(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.errors.push(ConfigValidationError {
            path: path.into(),
            message: message.into(),
        });
    }

    fn warn(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(ConfigValidationError {
            path: path.into(),
            message: message.into(),
        });
    }
}

/// Validate the config and return a report of all errors and warnings.
pub fn validate(config: &PaperForgeConfig) -> ValidationReport {
    let mut report = ValidationReport::default();
    validate_server(config, &mut report);
    validate_provider(config, &mut report);
    report
}

fn validate_server(config: &PaperForgeConfig, report: &mut ValidationReport) {
    if config.server.port == Some(0) {
        report.warn("server.port", "Port 0 binds a random port");
    }
    if config.server.max_upload_bytes == Some(0) {
        report.error(
            "server.maxUploadBytes",
            format!("Must be greater than zero; using {DEFAULT_MAX_UPLOAD_BYTES}"),
        );
    }
}

fn validate_provider(config: &PaperForgeConfig, report: &mut ValidationReport) {
    let kind = config.provider_kind();

    if kind.requires_api_key() && !config.has_api_key() {
        let env = kind.api_key_env().unwrap_or("PAPERFORGE_API_KEY");
        report.warn(
            "provider.apiKey",
            format!("No API key for {kind}; set {env}. Requests will fail until it is set"),
        );
    }
    if kind == ProviderKind::Mock {
        report.warn("provider.kind", "Mock provider selected; responses are canned");
    }

    if let Some(t) = config.provider.temperature {
        if !(0.0..=2.0).contains(&t) {
            report.error(
                "provider.temperature",
                format!("{t} is outside 0.0..=2.0; clamped to {}", clamp_temperature(t)),
            );
        }
    }
    if config.provider.timeout_secs == Some(0) {
        report.error("provider.timeoutSecs", "Must be greater than zero; timeout disabled");
    }
    if let Some(url) = &config.provider.base_url {
        if !is_http_url(url) {
            report.error(
                "provider.baseUrl",
                format!("{url:?} is not an http(s) URL; using the {kind} default"),
            );
        }
    }
}

fn clamp_temperature(t: f32) -> f32 {
    if t.is_nan() {
        paperforge_core::DEFAULT_TEMPERATURE
    } else {
        t.clamp(0.0, 2.0)
    }
}

fn is_http_url(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://")
}

/// Replace every value [`validate`] reports as an error with a usable one.
pub fn repair(mut config: PaperForgeConfig) -> PaperForgeConfig {
    if config.server.max_upload_bytes == Some(0) {
        config.server.max_upload_bytes = Some(DEFAULT_MAX_UPLOAD_BYTES);
    }
    if let Some(t) = config.provider.temperature {
        config.provider.temperature = Some(clamp_temperature(t));
    }
    if config.provider.timeout_secs == Some(0) {
        config.provider.timeout_secs = None;
    }
    if config.provider.base_url.as_deref().is_some_and(|u| !is_http_url(u)) {
        config.provider.base_url = None;
    }
    config
}
