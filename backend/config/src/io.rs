//! Config file discovery and loading.

use crate::schema::PaperForgeConfig;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info};

/// Config file looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = "paperforge.yaml";

/// Env var naming an explicit config file.
pub const ENV_CONFIG: &str = "PAPERFORGE_CONFIG";

/// Resolve which config file to read.
/// Priority: explicit path > `PAPERFORGE_CONFIG` > `./paperforge.yaml`.
pub fn config_file_path(explicit: Option<&Path>) -> PathBuf {
    if let Some(path) = explicit {
        return path.to_path_buf();
    }
    if let Ok(path) = std::env::var(ENV_CONFIG) {
        if !path.trim().is_empty() {
            return PathBuf::from(path);
        }
    }
    PathBuf::from(CONFIG_FILE_NAME)
}

/// Load and parse the config from disk.
///
/// Returns `Ok(Default::default())` if the file doesn't exist.
pub async fn load_config(path: &Path) -> Result<PaperForgeConfig> {
    if !path.exists() {
        debug!(path = %path.display(), "Config file does not exist; using defaults");
        return Ok(PaperForgeConfig::default());
    }

    let raw = fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    // An empty file parses as YAML null.
    if raw.trim().is_empty() {
        return Ok(PaperForgeConfig::default());
    }

    let config: PaperForgeConfig = serde_yaml::from_str(&raw)
        .with_context(|| format!("Failed to parse config YAML at: {}", path.display()))?;

    info!(path = %path.display(), "Loaded config");
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn missing_file_yields_defaults() {
        let path = std::env::temp_dir().join("paperforge-does-not-exist.yaml");
        let config = load_config(&path).await.unwrap();
        assert!(config.server.port.is_none());
    }

    #[tokio::test]
    async fn invalid_yaml_is_an_error() {
        let path = std::env::temp_dir().join(format!("paperforge-bad-{}.yaml", std::process::id()));
        fs::write(&path, "server: [not, a, map").await.unwrap();
        let err = load_config(&path).await.unwrap_err();
        assert!(err.to_string().contains("Failed to parse config YAML"));
        let _ = fs::remove_file(&path).await;
    }

    #[test]
    fn explicit_path_wins() {
        let path = config_file_path(Some(Path::new("/etc/paperforge.yaml")));
        assert_eq!(path, PathBuf::from("/etc/paperforge.yaml"));
    }
}
