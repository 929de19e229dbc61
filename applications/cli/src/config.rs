//! CLI configuration
use crate::error::{CliError, Result};
use pariszik_core::RecentPlayEntry;
use pariszik_playback::PlaybackConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default configuration file looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "pariszik.toml";

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CliConfig {
    #[serde(default = "default_storage")]
    pub storage: StorageSettings,

    #[serde(default)]
    pub playback: PlaybackConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageSettings {
    #[serde(default = "default_database_url")]
    pub database_url: String,
}

impl CliConfig {
    /// Load configuration from file and environment
    ///
    /// `path` must exist when given; otherwise `pariszik.toml` is read if
    /// present. Environment variables override both, e.g.
    /// `PARISZIK_STORAGE__DATABASE_URL` or `PARISZIK_PLAYBACK__VOLUME`.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut settings = config::Config::builder();

        match path {
            Some(path) => {
                if !path.exists() {
                    return Err(CliError::Config(format!(
                        "configuration file not found: {}",
                        path.display()
                    )));
                }
                settings = settings.add_source(config::File::from(path));
            }
            None => {
                let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    settings = settings.add_source(config::File::from(default_path));
                }
            }
        }

        settings = settings.add_source(
            config::Environment::with_prefix("PARISZIK")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config = settings
            .build()
            .map_err(|e| CliError::Config(e.to_string()))?;

        config
            .try_deserialize()
            .map_err(|e| CliError::Config(e.to_string()))
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.storage.database_url.trim().is_empty() {
            return Err(CliError::Config(
                "database URL is required (set PARISZIK_STORAGE__DATABASE_URL)".to_string(),
            ));
        }

        let volume = self.playback.volume;
        if !(0.0..=1.0).contains(&volume) {
            return Err(CliError::Config(format!(
                "playback volume must be between 0.0 and 1.0, got {}",
                volume
            )));
        }

        let capacity = self.playback.history_capacity;
        if !(1..=RecentPlayEntry::CAPACITY).contains(&capacity) {
            return Err(CliError::Config(format!(
                "playback history_capacity must be between 1 and {}, got {}",
                RecentPlayEntry::CAPACITY,
                capacity
            )));
        }

        Ok(())
    }
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            storage: default_storage(),
            playback: PlaybackConfig::default(),
        }
    }
}

// Default values
fn default_storage() -> StorageSettings {
    StorageSettings {
        database_url: default_database_url(),
    }
}

fn default_database_url() -> String {
    "sqlite://./data/pariszik.db".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_are_valid() {
        let config = CliConfig::default();
        assert_eq!(config.storage.database_url, "sqlite://./data/pariszik.db");
        assert_eq!(config.playback.volume, 0.7);
        config.validate().unwrap();
    }

    #[test]
    fn load_from_toml_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            "[storage]\ndatabase_url = \"sqlite://custom.db\"\n\n[playback]\nvolume = 0.3\nmuted = true"
        )
        .unwrap();

        let config = CliConfig::load(Some(file.path())).unwrap();

        assert_eq!(config.storage.database_url, "sqlite://custom.db");
        assert_eq!(config.playback.volume, 0.3);
        assert!(config.playback.muted);
        assert_eq!(config.playback.history_capacity, 10);
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let err = CliConfig::load(Some(Path::new("/nonexistent/pariszik.toml"))).unwrap_err();
        assert!(matches!(err, CliError::Config(_)));
    }

    #[test]
    fn rejects_out_of_range_volume() {
        let mut config = CliConfig::default();
        config.playback.volume = 1.5;
        assert!(config.validate().is_err());

        config.playback.volume = f32::NAN;
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_history_capacity_outside_range() {
        let mut config = CliConfig::default();
        config.playback.history_capacity = 0;
        assert!(config.validate().is_err());

        config.playback.history_capacity = 50;
        assert!(config.validate().is_err());

        config.playback.history_capacity = 10;
        config.validate().unwrap();
    }

    #[test]
    fn rejects_empty_database_url() {
        let mut config = CliConfig::default();
        config.storage.database_url = "  ".to_string();
        assert!(config.validate().is_err());
    }
}
