//! Config defaults: applies sensible default values to parsed config.

use paperforge_core::{DEFAULT_MAX_UPLOAD_BYTES, DEFAULT_TEMPERATURE};

use crate::schema::PaperForgeConfig;

pub const DEFAULT_HOST: &str = "0.0.0.0";

pub const DEFAULT_PORT: u16 = 8000;

pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Apply all defaults to a freshly loaded config.
pub fn apply_all_defaults(config: PaperForgeConfig) -> PaperForgeConfig {
    let config = apply_server_defaults(config);
    let config = apply_provider_defaults(config);
    let config = apply_prompt_defaults(config);
    apply_logging_defaults(config)
}

fn apply_server_defaults(mut config: PaperForgeConfig) -> PaperForgeConfig {
    let server = &mut config.server;
    server.host.get_or_insert_with(|| DEFAULT_HOST.to_string());
    server.port.get_or_insert(DEFAULT_PORT);
    server.max_upload_bytes.get_or_insert(DEFAULT_MAX_UPLOAD_BYTES);
    server.strict_errors.get_or_insert(false);
    config
}

/// Fill provider kind, model and temperature. The API key is never defaulted.
fn apply_provider_defaults(mut config: PaperForgeConfig) -> PaperForgeConfig {
    let kind = config.provider_kind();
    let provider = &mut config.provider;
    provider.kind = Some(kind);
    if provider.model.as_deref().map_or(true, str::is_empty) {
        provider.model = Some(kind.default_model().to_string());
    }
    provider.temperature.get_or_insert(DEFAULT_TEMPERATURE);
    config
}

fn apply_prompt_defaults(mut config: PaperForgeConfig) -> PaperForgeConfig {
    config.prompt.include_section.get_or_insert(true);
    config
}

fn apply_logging_defaults(mut config: PaperForgeConfig) -> PaperForgeConfig {
    let logging = &mut config.logging;
    logging
        .level
        .get_or_insert_with(|| DEFAULT_LOG_LEVEL.to_string());
    logging.json.get_or_insert(false);
    config
}

#[cfg(test)]
mod tests {
    use super::*;
    use paperforge_core::ProviderKind;

    #[test]
    fn fills_every_optional_field() {
        let config = apply_all_defaults(PaperForgeConfig::default());
        assert_eq!(config.server.port, Some(DEFAULT_PORT));
        assert_eq!(config.server.max_upload_bytes, Some(DEFAULT_MAX_UPLOAD_BYTES));
        assert_eq!(config.server.strict_errors, Some(false));
        assert_eq!(config.provider.kind, Some(ProviderKind::Groq));
        assert_eq!(
            config.provider.model.as_deref(),
            Some(ProviderKind::Groq.default_model())
        );
        assert_eq!(config.provider.temperature, Some(DEFAULT_TEMPERATURE));
        assert_eq!(config.prompt.include_section, Some(true));
        assert_eq!(config.logging.level.as_deref(), Some("info"));
        assert!(config.provider.api_key.is_none());
    }

    #[test]
    fn model_default_follows_provider() {
        let mut config = PaperForgeConfig::default();
        config.provider.kind = Some(ProviderKind::Gemini);
        let config = apply_all_defaults(config);
        assert_eq!(config.provider.model.as_deref(), Some("gemini-2.0-flash"));
    }

    #[test]
    fn explicit_values_are_kept() {
        let mut config = PaperForgeConfig::default();
        config.server.port = Some(1234);
        config.prompt.include_section = Some(false);
        let config = apply_all_defaults(config);
        assert_eq!(config.server.port, Some(1234));
        assert_eq!(config.prompt.include_section, Some(false));
    }
}
