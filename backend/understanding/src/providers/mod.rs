pub mod gemini;
pub mod groq;
pub mod mock;

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::Client;
use tracing::{info, warn};

use paperforge_core::{ImageTextProvider, ProviderKind};

use gemini::GeminiProvider;
use groq::GroqProvider;
use mock::MockProvider;

/// Everything needed to construct the configured provider.
#[derive(Debug, Clone, Default)]
pub struct ProviderSettings {
    pub kind: ProviderKind,
    pub api_key: Option<String>,
    pub model: Option<String>,
    pub base_url: Option<String>,
    /// Upper bound on one upstream call. `None` leaves the client without a timeout.
    pub timeout: Option<Duration>,
    /// Reply used by the mock provider.
    pub mock_response: Option<String>,
}

impl ProviderSettings {
    pub fn new(kind: ProviderKind) -> Self {
        Self {
            kind,
            ..Self::default()
        }
    }

    /// Model that will be sent upstream.
    pub fn effective_model(&self) -> &str {
        self.model
            .as_deref()
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| self.kind.default_model())
    }

    fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref().map(str::trim).filter(|k| !k.is_empty())
    }
}

/// Build the shared provider handle.
///
/// Returns `Ok(None)` when the provider needs an API key and none is set; the
/// caller decides how to surface that.
pub fn build_provider(settings: &ProviderSettings) -> Result<Option<Arc<dyn ImageTextProvider>>> {
    let mut builder = Client::builder();
    if let Some(timeout) = settings.timeout {
        builder = builder.timeout(timeout);
    }
    let client = builder.build().context("Failed to build HTTP client")?;

    let provider: Arc<dyn ImageTextProvider> = match settings.kind {
        ProviderKind::Mock => {
            let mut mock = MockProvider::new("mock");
            if let Some(reply) = &settings.mock_response {
                mock = mock.with_response(reply.clone());
            }
            Arc::new(mock)
        }
        ProviderKind::Groq => {
            let Some(key) = settings.api_key() else {
                warn!(provider = "groq", "No API key configured; requests will fail");
                return Ok(None);
            };
            let mut groq = GroqProvider::new(key)
                .with_client(client)
                .with_model(settings.effective_model());
            if let Some(url) = &settings.base_url {
                groq = groq.with_base_url(url.clone());
            }
            Arc::new(groq)
        }
        ProviderKind::Gemini => {
            let Some(key) = settings.api_key() else {
                warn!(provider = "gemini", "No API key configured; requests will fail");
                return Ok(None);
            };
            let mut gemini = GeminiProvider::new(key)
                .with_client(client)
                .with_model(settings.effective_model());
            if let Some(url) = &settings.base_url {
                gemini = gemini.with_base_url(url.clone());
            }
            Arc::new(gemini)
        }
    };

    info!(provider = provider.name(), model = provider.model(), "Provider ready");
    Ok(Some(provider))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_key_yields_no_provider() {
        let settings = ProviderSettings::new(ProviderKind::Groq);
        assert!(build_provider(&settings).unwrap().is_none());

        let settings = ProviderSettings {
            api_key: Some("   ".into()),
            ..ProviderSettings::new(ProviderKind::Gemini)
        };
        assert!(build_provider(&settings).unwrap().is_none());
    }

    #[test]
    fn builds_groq_with_model_override() {
        let settings = ProviderSettings {
            api_key: Some("gsk_test".into()),
            model: Some("llama-3.2-90b-vision-preview".into()),
            ..ProviderSettings::new(ProviderKind::Groq)
        };
        let provider = build_provider(&settings).unwrap().unwrap();
        assert_eq!(provider.name(), "groq");
        assert_eq!(provider.model(), "llama-3.2-90b-vision-preview");
    }

    #[test]
    fn empty_model_falls_back_to_default() {
        let settings = ProviderSettings {
            model: Some(String::new()),
            ..ProviderSettings::new(ProviderKind::Gemini)
        };
        assert_eq!(settings.effective_model(), "gemini-2.0-flash");
    }

    #[test]
    fn mock_needs_no_key() {
        let settings = ProviderSettings {
            mock_response: Some("canned".into()),
            ..ProviderSettings::new(ProviderKind::Mock)
        };
        let provider = build_provider(&settings).unwrap().unwrap();
        assert_eq!(provider.name(), "mock");
    }
}
