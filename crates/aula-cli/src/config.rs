use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// CLI configuration persisted as a JSON file under the user config dir.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CliConfig {
    /// Server base URL, scheme included.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
}

impl CliConfig {
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("aula").join("config.json"))
    }

    /// Load config from a JSON file; a missing or unreadable file is an
    /// empty config.
    pub fn load(path: &Path) -> Self {
        std::fs::read_to_string(path)
            .ok()
            .and_then(|content| serde_json::from_str(&content).ok())
            .unwrap_or_default()
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let content = serde_json::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");
        let config = CliConfig {
            domain: Some("https://school.test".to_string()),
        };
        config.save(&path).unwrap();

        let loaded = CliConfig::load(&path);
        assert_eq!(loaded.domain.as_deref(), Some("https://school.test"));
    }

    #[test]
    fn test_missing_file_is_empty_config() {
        let dir = tempdir().unwrap();
        let loaded = CliConfig::load(&dir.path().join("nope.json"));
        assert!(loaded.domain.is_none());
    }

    #[test]
    fn test_garbage_file_is_empty_config() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{not json").unwrap();
        let loaded = CliConfig::load(&path);
        assert!(loaded.domain.is_none());
    }
}
