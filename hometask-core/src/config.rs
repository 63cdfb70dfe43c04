//! Global hometask configuration.

use std::path::PathBuf;

use serde::Deserialize;

use crate::error::{HomeTaskError, HomeTaskResult};

/// Global configuration at ~/.config/hometask/config.toml
///
/// Everything is optional; a missing file yields the defaults.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct GlobalConfig {
    /// Directory holding events.json and alarms.json. Defaults to the
    /// platform data dir. A leading `~` is expanded.
    pub data_dir: Option<String>,

    /// Notifier backend program to register alarms with. Defaults to
    /// `hometask-notifier` when present on PATH; alarms are skipped
    /// otherwise.
    pub notifier: Option<String>,
}

impl GlobalConfig {
    pub fn config_path() -> HomeTaskResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| HomeTaskError::Config("Could not determine config directory".into()))?
            .join("hometask");

        Ok(config_dir.join("config.toml"))
    }

    /// Load the config file, defaulting when it doesn't exist.
    pub fn load() -> HomeTaskResult<GlobalConfig> {
        let path = Self::config_path()?;
        if !path.exists() {
            return Ok(GlobalConfig::default());
        }

        let content = std::fs::read_to_string(&path)?;
        toml::from_str(&content)
            .map_err(|e| HomeTaskError::Config(format!("{}: {}", path.display(), e)))
    }

    /// Resolve the directory the stores live in.
    pub fn data_dir(&self) -> HomeTaskResult<PathBuf> {
        match &self.data_dir {
            Some(dir) => Ok(PathBuf::from(shellexpand::tilde(dir).into_owned())),
            None => {
                let base = dirs::data_dir().ok_or_else(|| {
                    HomeTaskError::Config("Could not determine data directory".into())
                })?;
                Ok(base.join("hometask"))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_data_dir_wins() {
        let config = GlobalConfig {
            data_dir: Some("/tmp/hometask-data".to_string()),
            notifier: None,
        };
        assert_eq!(
            config.data_dir().unwrap(),
            PathBuf::from("/tmp/hometask-data")
        );
    }

    #[test]
    fn tilde_is_expanded() {
        let config = GlobalConfig {
            data_dir: Some("~/hometask-data".to_string()),
            notifier: None,
        };
        let dir = config.data_dir().unwrap();
        assert!(!dir.to_string_lossy().starts_with('~'));
    }

    #[test]
    fn config_parses_partial_toml() {
        let config: GlobalConfig = toml::from_str("notifier = \"my-notifier\"").unwrap();
        assert_eq!(config.notifier.as_deref(), Some("my-notifier"));
        assert_eq!(config.data_dir, None);
    }
}
