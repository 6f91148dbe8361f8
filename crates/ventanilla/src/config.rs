//! Configuration management for ventanilla.
//!
//! This module provides configuration loading and validation using figment,
//! supporting TOML config files, environment variables, and defaults.

use std::path::PathBuf;
use std::time::Duration;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::record::RecordKind;

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "config.toml";

/// Default data directory name.
const DATA_DIR_NAME: &str = "ventanilla";

/// File name of the intake-defaults side-store.
const PREFS_FILE_NAME: &str = "prefs.json";

/// Application configuration.
///
/// Configuration is loaded from (in order of precedence, highest first):
/// 1. Environment variables (prefixed with `VENTANILLA_`)
/// 2. TOML config file at `~/.config/ventanilla/config.toml`
/// 3. Default values
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// HTTP server configuration.
    pub server: ServerConfig,
    /// Storage configuration.
    pub storage: StorageConfig,
    /// Listing/refresh configuration.
    pub listing: ListingConfig,
}

/// HTTP server configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to bind the intake API to.
    pub host: String,
    /// Port to bind the intake API to.
    pub port: u16,
}

/// Storage-related configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Directory holding the collection files.
    /// Defaults to `~/.local/share/ventanilla`
    pub data_dir: Option<PathBuf>,
}

/// Listing-related configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListingConfig {
    /// Seconds between refreshes in watch mode.
    pub refresh_interval_secs: u64,
    /// Base URL of the intake API for client commands.
    /// Defaults to the configured server host and port.
    pub server_url: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3001,
        }
    }
}

impl Default for ListingConfig {
    fn default() -> Self {
        Self {
            refresh_interval_secs: 30,
            server_url: None,
        }
    }
}

impl Config {
    /// Load configuration from all sources.
    ///
    /// Configuration is loaded in this order (later sources override earlier):
    /// 1. Default values
    /// 2. TOML config file (if exists)
    /// 3. Environment variables (prefixed with `VENTANILLA_`)
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Load configuration with an optional custom config path.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load_from(config_path: Option<PathBuf>) -> Result<Self> {
        let config_file = config_path.unwrap_or_else(Self::default_config_path);

        let figment = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(&config_file))
            .merge(Env::prefixed("VENTANILLA_").split("_"));

        let config: Config = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Get the default configuration file path.
    #[must_use]
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from(".config"))
            .join(DATA_DIR_NAME)
            .join(CONFIG_FILE_NAME)
    }

    /// Get the default data directory path.
    #[must_use]
    pub fn default_data_dir() -> PathBuf {
        dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from(".local/share"))
            .join(DATA_DIR_NAME)
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid.
    pub fn validate(&self) -> Result<()> {
        if self.server.port == 0 {
            return Err(Error::ConfigValidation {
                message: "server.port must be greater than 0".to_string(),
            });
        }

        if self.listing.refresh_interval_secs == 0 {
            return Err(Error::ConfigValidation {
                message: "refresh_interval_secs must be greater than 0".to_string(),
            });
        }

        Ok(())
    }

    /// Get the data directory, resolving defaults if not set.
    #[must_use]
    pub fn data_dir(&self) -> PathBuf {
        self.storage
            .data_dir
            .clone()
            .unwrap_or_else(Self::default_data_dir)
    }

    /// Get the backing file path for a collection.
    #[must_use]
    pub fn collection_path(&self, kind: RecordKind) -> PathBuf {
        self.data_dir().join(kind.file_name())
    }

    /// Get the path of the intake-defaults side-store.
    #[must_use]
    pub fn prefs_path(&self) -> PathBuf {
        self.data_dir().join(PREFS_FILE_NAME)
    }

    /// The address the server binds to, as `host:port`.
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Base URL of the intake API for client commands.
    #[must_use]
    pub fn api_url(&self) -> String {
        self.listing.server_url.clone().unwrap_or_else(|| {
            format!("http://{}:{}/api", self.server.host, self.server.port)
        })
    }

    /// Get the watch-mode refresh interval as a Duration.
    #[must_use]
    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.listing.refresh_interval_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 3001);
        assert!(config.storage.data_dir.is_none());
        assert_eq!(config.listing.refresh_interval_secs, 30);
        assert!(config.listing.server_url.is_none());
    }

    #[test]
    fn test_validate_valid_config() {
        let config = Config::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_zero_port() {
        let mut config = Config::default();
        config.server.port = 0;

        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("server.port"));
    }

    #[test]
    fn test_validate_zero_refresh_interval() {
        let mut config = Config::default();
        config.listing.refresh_interval_secs = 0;

        let result = config.validate();
        assert!(result.is_err());
        let err = result.unwrap_err().to_string();
        assert!(err.contains("refresh_interval_secs"));
    }

    #[test]
    fn test_load_nonexistent_config() {
        // Loading from a nonexistent path should work (uses defaults)
        let result = Config::load_from(Some(PathBuf::from("/nonexistent/config.toml")));
        assert!(result.is_ok());

        let config = result.unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_load_from_toml_file() {
        let mut file = tempfile::NamedTempFile::with_suffix(".toml").unwrap();
        writeln!(
            file,
            "[server]\nport = 8080\n\n[listing]\nrefresh_interval_secs = 5"
        )
        .unwrap();

        let config = Config::load_from(Some(file.path().to_path_buf())).unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.listing.refresh_interval_secs, 5);
    }

    #[test]
    fn test_data_dir_default() {
        let config = Config::default();
        assert!(config.data_dir().to_string_lossy().contains("ventanilla"));
    }

    #[test]
    fn test_data_dir_custom() {
        let mut config = Config::default();
        config.storage.data_dir = Some(PathBuf::from("/srv/ventanilla"));

        assert_eq!(config.data_dir(), PathBuf::from("/srv/ventanilla"));
        assert_eq!(
            config.collection_path(RecordKind::Reclamo),
            PathBuf::from("/srv/ventanilla/reclamos.json")
        );
        assert_eq!(
            config.collection_path(RecordKind::Solicitud),
            PathBuf::from("/srv/ventanilla/solicitudes.json")
        );
        assert_eq!(
            config.prefs_path(),
            PathBuf::from("/srv/ventanilla/prefs.json")
        );
    }

    #[test]
    fn test_bind_addr() {
        let config = Config::default();
        assert_eq!(config.bind_addr(), "127.0.0.1:3001");
    }

    #[test]
    fn test_api_url_default() {
        let config = Config::default();
        assert_eq!(config.api_url(), "http://127.0.0.1:3001/api");
    }

    #[test]
    fn test_api_url_override() {
        let mut config = Config::default();
        config.listing.server_url = Some("http://intake.example.com/api".to_string());
        assert_eq!(config.api_url(), "http://intake.example.com/api");
    }

    #[test]
    fn test_refresh_interval() {
        let config = Config::default();
        assert_eq!(config.refresh_interval(), Duration::from_secs(30));
    }

    #[test]
    fn test_default_config_path() {
        let path = Config::default_config_path();
        assert!(path.to_string_lossy().contains("ventanilla"));
        assert!(path.to_string_lossy().contains("config.toml"));
    }
}
