//! PaperForge runtime configuration schema.
//!
//! Every field is optional so a partial YAML file (or none at all) is valid;
//! `defaults::apply_all_defaults` fills the gaps.

use paperforge_core::ProviderKind;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

/// Root configuration for the relay.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaperForgeConfig {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub provider: ProviderConfig,

    #[serde(default)]
    pub prompt: PromptConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

// ---------------------------------------------------------------------------
// Server
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,

    /// Largest accepted request body in bytes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_upload_bytes: Option<usize>,

    /// Report failures with real HTTP status codes and an `error` field
    /// instead of a 200 carrying the error text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strict_errors: Option<bool>,
}

// ---------------------------------------------------------------------------
// Provider
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<ProviderKind>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,

    /// Per-call timeout. Unset means no timeout.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,

    /// Reply returned by the `mock` provider.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mock_response: Option<String>,
}

// ---------------------------------------------------------------------------
// Prompt
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptConfig {
    /// Name the uploaded section in the prompt.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include_section: Option<bool>,
}

// ---------------------------------------------------------------------------
// Logging
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoggingConfig {
    /// Filter directive used when `RUST_LOG` is unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,

    /// Directory for the daily-rolling JSON log. No file log when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dir: Option<String>,

    /// Emit console logs as JSON lines.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub json: Option<bool>,
}

impl PaperForgeConfig {
    pub fn provider_kind(&self) -> ProviderKind {
        self.provider.kind.unwrap_or_default()
    }

    /// Address string the HTTP server binds to.
    pub fn bind_addr(&self) -> String {
        format!(
            "{}:{}",
            self.server.host.as_deref().unwrap_or(crate::defaults::DEFAULT_HOST),
            self.server.port.unwrap_or(crate::defaults::DEFAULT_PORT)
        )
    }

    pub fn has_api_key(&self) -> bool {
        self.provider
            .api_key
            .as_deref()
            .is_some_and(|k| !k.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_partial_yaml() {
        let yaml = r#"
server:
  port: 9000
provider:
  kind: gemini
  model: gemini-1.5-flash
prompt:
  includeSection: false
"#;
        let config: PaperForgeConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.server.port, Some(9000));
        assert_eq!(config.provider_kind(), ProviderKind::Gemini);
        assert_eq!(config.provider.model.as_deref(), Some("gemini-1.5-flash"));
        assert_eq!(config.prompt.include_section, Some(false));
        assert!(config.logging.dir.is_none());
    }

    #[test]
    fn empty_config_binds_default_address() {
        let config = PaperForgeConfig::default();
        assert_eq!(config.bind_addr(), "0.0.0.0:8000");
        assert!(!config.has_api_key());
    }
}
