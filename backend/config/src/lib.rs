//! PaperForge relay configuration management.
//!
//! Provides:
//! - Typed config schema (server, provider, prompt, logging)
//! - YAML file loading
//! - `${ENV_VAR}` substitution inside the file
//! - `PAPERFORGE_*` environment overrides
//! - Default value application
//! - Validation and redaction for safe logging

pub mod defaults;
pub mod env;
pub mod io;
pub mod overrides;
pub mod redact;
pub mod schema;
pub mod validation;

// Re-export most-used types at crate root.
pub use defaults::apply_all_defaults;
pub use env::{resolve_env_vars_lenient_with, resolve_env_vars_with, MissingEnvVarError};
pub use io::{config_file_path, load_config};
pub use overrides::apply_env_overrides_with;
pub use redact::redact;
pub use schema::{LoggingConfig, PaperForgeConfig, PromptConfig, ProviderConfig, ServerConfig};
pub use validation::{repair, validate, ConfigValidationError, ValidationReport};

use anyhow::{Context, Result};
use serde_json::Value;
use std::collections::HashMap;
use std::path::Path;

/// A loaded config plus the findings made while preparing it.
///
/// Findings are returned rather than logged because the config is loaded
/// before the logger exists.
#[derive(Debug)]
pub struct PreparedConfig {
    pub config: PaperForgeConfig,
    /// `${VAR}` references that were unset and replaced by empty strings.
    pub missing_env: Vec<MissingEnvVarError>,
    /// Validation findings. Errors have already been repaired in `config`.
    pub report: ValidationReport,
}

impl PreparedConfig {
    /// Emit every finding through `tracing`.
    pub fn log_findings(&self) {
        for m in &self.missing_env {
            tracing::warn!(var = %m.var_name, path = %m.config_path, "Config references unset env var");
        }
        for warning in &self.report.warnings {
            tracing::warn!(path = %warning.path, message = %warning.message, "Config warning");
        }
        for error in &self.report.errors {
            tracing::error!(path = %error.path, message = %error.message, "Config error");
        }
    }
}

/// Load the config file, substitute env vars, apply env overrides and
/// defaults, then validate and repair.
///
/// This is the main entry point for loading a config at runtime. A missing
/// API key never fails here; it is reported as a validation warning.
pub async fn load_and_prepare(path: &Path) -> Result<PreparedConfig> {
    let env: HashMap<String, String> = std::env::vars().collect();
    load_and_prepare_with(path, &env).await
}

/// Same as [`load_and_prepare`] with an explicit environment.
pub async fn load_and_prepare_with(
    path: &Path,
    env: &HashMap<String, String>,
) -> Result<PreparedConfig> {
    let raw_config = load_config(path).await?;

    let value: Value = serde_json::to_value(&raw_config)
        .context("Failed to serialize config for processing")?;

    // Unset references become empty strings so a missing key does not stop boot.
    let (value, missing_env) = resolve_env_vars_lenient_with(&value, env);

    let config: PaperForgeConfig =
        serde_json::from_value(value).context("Failed to deserialize config after processing")?;

    let config = apply_env_overrides_with(config, env)?;
    let config = apply_all_defaults(config);

    let report = validate(&config);
    let config = repair(config);

    Ok(PreparedConfig {
        config,
        missing_env,
        report,
    })
}
