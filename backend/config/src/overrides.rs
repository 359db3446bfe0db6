//! `PAPERFORGE_*` environment overrides, applied on top of the config file.

use anyhow::{Context, Result};
use paperforge_core::ProviderKind;
use std::collections::HashMap;
use std::str::FromStr;

use crate::schema::PaperForgeConfig;

pub const ENV_HOST: &str = "PAPERFORGE_HOST";
pub const ENV_PORT: &str = "PAPERFORGE_PORT";
pub const ENV_PROVIDER: &str = "PAPERFORGE_PROVIDER";
pub const ENV_MODEL: &str = "PAPERFORGE_MODEL";
pub const ENV_BASE_URL: &str = "PAPERFORGE_BASE_URL";
pub const ENV_API_KEY: &str = "PAPERFORGE_API_KEY";
pub const ENV_TEMPERATURE: &str = "PAPERFORGE_TEMPERATURE";
pub const ENV_MAX_UPLOAD_BYTES: &str = "PAPERFORGE_MAX_UPLOAD_BYTES";
pub const ENV_STRICT_ERRORS: &str = "PAPERFORGE_STRICT_ERRORS";
pub const ENV_TIMEOUT_SECS: &str = "PAPERFORGE_TIMEOUT_SECS";
pub const ENV_INCLUDE_SECTION: &str = "PAPERFORGE_INCLUDE_SECTION";
pub const ENV_LOG_DIR: &str = "PAPERFORGE_LOG_DIR";
pub const ENV_LOG_JSON: &str = "PAPERFORGE_LOG_JSON";

/// Apply overrides from an environment map.
///
/// Precedence for the API key: `PAPERFORGE_API_KEY`, then the config file,
/// then the provider's own variable (`GROQ_API_KEY`, `GEMINI_API_KEY`).
pub fn apply_env_overrides_with(
    mut config: PaperForgeConfig,
    env: &HashMap<String, String>,
) -> Result<PaperForgeConfig> {
    let get = |name: &str| lookup(env, name);

    if let Some(host) = get(ENV_HOST) {
        config.server.host = Some(host.to_string());
    }
    if let Some(port) = get(ENV_PORT) {
        config.server.port = Some(parse(ENV_PORT, port)?);
    }
    if let Some(bytes) = get(ENV_MAX_UPLOAD_BYTES) {
        config.server.max_upload_bytes = Some(parse(ENV_MAX_UPLOAD_BYTES, bytes)?);
    }
    if let Some(flag) = get(ENV_STRICT_ERRORS) {
        config.server.strict_errors = Some(parse_bool(ENV_STRICT_ERRORS, flag)?);
    }

    if let Some(kind) = get(ENV_PROVIDER) {
        let kind = ProviderKind::from_str(kind)
            .with_context(|| format!("Invalid value for {ENV_PROVIDER}"))?;
        config.provider.kind = Some(kind);
    }
    if let Some(model) = get(ENV_MODEL) {
        config.provider.model = Some(model.to_string());
    }
    if let Some(url) = get(ENV_BASE_URL) {
        config.provider.base_url = Some(url.to_string());
    }
    if let Some(temperature) = get(ENV_TEMPERATURE) {
        config.provider.temperature = Some(parse(ENV_TEMPERATURE, temperature)?);
    }
    if let Some(secs) = get(ENV_TIMEOUT_SECS) {
        config.provider.timeout_secs = Some(parse(ENV_TIMEOUT_SECS, secs)?);
    }

    if let Some(key) = get(ENV_API_KEY) {
        config.provider.api_key = Some(key.to_string());
    } else if !config.has_api_key() {
        let vendor_key = config
            .provider_kind()
            .api_key_env()
            .and_then(|name| lookup(env, name));
        if let Some(key) = vendor_key {
            config.provider.api_key = Some(key.to_string());
        }
    }

    if let Some(flag) = get(ENV_INCLUDE_SECTION) {
        config.prompt.include_section = Some(parse_bool(ENV_INCLUDE_SECTION, flag)?);
    }

    if let Some(level) = get("RUST_LOG") {
        config.logging.level = Some(level.to_string());
    }
    if let Some(dir) = get(ENV_LOG_DIR) {
        config.logging.dir = Some(dir.to_string());
    }
    if let Some(flag) = get(ENV_LOG_JSON) {
        config.logging.json = Some(parse_bool(ENV_LOG_JSON, flag)?);
    }

    Ok(config)
}

fn lookup<'a>(env: &'a HashMap<String, String>, name: &str) -> Option<&'a str> {
    env.get(name).map(|v| v.trim()).filter(|v| !v.is_empty())
}

fn parse<T>(name: &str, raw: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    raw.parse::<T>()
        .with_context(|| format!("Invalid value for {name}: {raw:?}"))
}

fn parse_bool(name: &str, raw: &str) -> Result<bool> {
    match raw.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => anyhow::bail!("Invalid value for {name}: {raw:?} (expected true/false)"),
    }
}
