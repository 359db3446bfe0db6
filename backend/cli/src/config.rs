//! Maps the loaded `PaperForgeConfig` onto the runtime pieces.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;

use paperforge_config::{config_file_path, load_and_prepare, PaperForgeConfig, PreparedConfig};
use paperforge_core::{ImageTextProvider, DEFAULT_MAX_UPLOAD_BYTES, DEFAULT_TEMPERATURE};
use paperforge_gateway::GatewayState;
use paperforge_understanding::ProviderSettings;

/// Load the layered config. `.env` must already be applied; findings are
/// logged by the caller once the logger is up.
pub async fn load(explicit: Option<&Path>) -> Result<PreparedConfig> {
    let path = config_file_path(explicit);
    load_and_prepare(&path).await
}

pub fn provider_settings(config: &PaperForgeConfig) -> ProviderSettings {
    let provider = &config.provider;
    ProviderSettings {
        kind: config.provider_kind(),
        api_key: provider.api_key.clone(),
        model: provider.model.clone(),
        base_url: provider.base_url.clone(),
        timeout: provider.timeout_secs.map(Duration::from_secs),
        mock_response: provider.mock_response.clone(),
    }
}

pub fn gateway_state(
    config: &PaperForgeConfig,
    provider: Option<Arc<dyn ImageTextProvider>>,
) -> GatewayState {
    let settings = provider_settings(config);
    GatewayState::new(settings.kind.as_str(), settings.effective_model())
        .with_provider(provider)
        .with_temperature(config.provider.temperature.unwrap_or(DEFAULT_TEMPERATURE))
        .with_max_tokens(config.provider.max_tokens)
        .with_include_section(config.prompt.include_section.unwrap_or(true))
        .with_strict_errors(config.server.strict_errors.unwrap_or(false))
        .with_max_upload_bytes(
            config
                .server
                .max_upload_bytes
                .unwrap_or(DEFAULT_MAX_UPLOAD_BYTES),
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use paperforge_core::ProviderKind;

    #[test]
    fn maps_provider_and_server_fields() {
        let mut config = PaperForgeConfig::default();
        config.provider.kind = Some(ProviderKind::Gemini);
        config.provider.timeout_secs = Some(30);
        config.provider.temperature = Some(0.3);
        config.server.strict_errors = Some(true);

        let settings = provider_settings(&config);
        assert_eq!(settings.kind, ProviderKind::Gemini);
        assert_eq!(settings.timeout, Some(Duration::from_secs(30)));

        let state = gateway_state(&config, None);
        assert_eq!(state.provider_name, "gemini");
        assert_eq!(state.model, "gemini-2.0-flash");
        assert!((state.temperature - 0.3).abs() < f32::EPSILON);
        assert!(state.strict_errors);
        assert!(state.include_section);
        assert!(!state.is_configured());
    }

    #[test]
    fn empty_config_uses_groq_defaults() {
        let state = gateway_state(&PaperForgeConfig::default(), None);
        assert_eq!(state.provider_name, "groq");
        assert_eq!(state.max_upload_bytes, DEFAULT_MAX_UPLOAD_BYTES);
        assert!(!state.strict_errors);
    }
}
