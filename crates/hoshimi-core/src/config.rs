use std::path::PathBuf;
use std::time::Duration;

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::cdn::Cdn;
use crate::error::HoshimiError;

const DEFAULT_CONFIG: &str = include_str!("../../../config/default.toml");

/// Top-level application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub api: ApiConfig,
    pub storage: StorageConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    pub base_url: String,
    pub cdn_host: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Mirror the state tree to disk after every commit.
    pub persist: bool,
    pub state_key: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// `tracing_subscriber::EnvFilter` directive, overridden by `RUST_LOG`.
    pub filter: String,
}

impl ApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn cdn(&self) -> Cdn {
        Cdn::new(self.cdn_host.clone())
    }
}

impl AppConfig {
    /// Load config: user file if it exists, otherwise the built-in defaults.
    pub fn load() -> Result<Self, HoshimiError> {
        let user_path = Self::config_path();
        if user_path.exists() {
            let user_str = std::fs::read_to_string(&user_path)?;
            Self::parse(&user_str)
        } else {
            Self::parse(DEFAULT_CONFIG)
        }
    }

    pub fn parse(content: &str) -> Result<Self, HoshimiError> {
        toml::from_str(content).map_err(|e| HoshimiError::Config(e.to_string()))
    }

    /// Path to user config file (XDG on Linux, AppData on Windows).
    pub fn config_path() -> PathBuf {
        Self::project_dirs()
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from("config.toml"))
    }

    /// Path to the persisted state database.
    pub fn db_path() -> PathBuf {
        Self::project_dirs()
            .map(|d| d.data_dir().join("hoshimi.db"))
            .unwrap_or_else(|| PathBuf::from("hoshimi.db"))
    }

    /// Ensure the data directory exists and return the DB path.
    pub fn ensure_db_path() -> Result<PathBuf, HoshimiError> {
        let path = Self::db_path();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        Ok(path)
    }

    fn project_dirs() -> Option<ProjectDirs> {
        ProjectDirs::from("", "", "hoshimi")
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        toml::from_str(DEFAULT_CONFIG).expect("built-in default config is valid TOML")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_parses() {
        let config = AppConfig::default();
        assert_eq!(config.api.cdn_host, "masterani.me");
        assert_eq!(config.api.timeout(), Duration::from_secs(15));
        assert!(config.storage.persist);
        assert_eq!(config.storage.state_key, "hoshimi");
    }

    #[test]
    fn test_cdn_from_config() {
        let config = AppConfig::default();
        assert_eq!(
            config.api.cdn().poster_url("a.jpg"),
            "https://cdn.masterani.me/poster/1/a.jpg"
        );
    }

    #[test]
    fn test_invalid_config() {
        assert!(matches!(
            AppConfig::parse("[api]\nbase_url = 3"),
            Err(HoshimiError::Config(_))
        ));
    }

    #[test]
    fn test_roundtrip() {
        let config = AppConfig::default();
        let serialized = toml::to_string_pretty(&config).unwrap();
        let deserialized = AppConfig::parse(&serialized).unwrap();
        assert_eq!(deserialized.api.base_url, config.api.base_url);
    }
}
