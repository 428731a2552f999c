//! Client configuration.
//!
//! Configuration precedence, highest first:
//! 1. Explicit overrides (CLI flags)
//! 2. Environment variables (`GOBARBER_API_URL`, `GOBARBER_SESSION_FILE`)
//! 3. Local config file (`./.gobarberrc`)
//! 4. Global config file (`~/.gobarber/config.toml`)
//! 5. Defaults

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default GoBarber API base URL.
pub const DEFAULT_API_URL: &str = "http://localhost:3333/";

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default toast display duration in milliseconds.
pub const DEFAULT_TOAST_DURATION_MS: u64 = 3000;

/// Environment variable overriding the API base URL.
pub const API_URL_ENV: &str = "GOBARBER_API_URL";

/// Environment variable overriding the session file path.
pub const SESSION_FILE_ENV: &str = "GOBARBER_SESSION_FILE";

/// API connection settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL every API path is joined onto.
    #[serde(default = "default_api_url")]
    pub base_url: String,
    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self { base_url: default_api_url(), timeout_secs: DEFAULT_TIMEOUT_SECS }
    }
}

impl ApiConfig {
    /// Creates an API config for the given base URL with the default timeout.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self { base_url: base_url.into(), ..Self::default() }
    }

    /// Returns the request timeout.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Session storage settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Path of the session file (defaults to `~/.gobarber/session.json`).
    #[serde(default)]
    pub session_file: Option<PathBuf>,
}

impl StorageConfig {
    /// Returns the configured session file or the default location.
    pub fn session_file_or_default(&self) -> PathBuf {
        self.session_file.clone().unwrap_or_else(ClientConfig::default_session_file)
    }
}

/// Toast settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToastConfig {
    /// How long a toast stays visible, in milliseconds.
    #[serde(default = "default_toast_duration_ms")]
    pub duration_ms: u64,
}

fn default_toast_duration_ms() -> u64 {
    DEFAULT_TOAST_DURATION_MS
}

impl Default for ToastConfig {
    fn default() -> Self {
        Self { duration_ms: DEFAULT_TOAST_DURATION_MS }
    }
}

impl ToastConfig {
    /// Returns the display duration.
    pub fn duration(&self) -> Duration {
        Duration::from_millis(self.duration_ms)
    }
}

/// Root client configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// API settings.
    #[serde(default)]
    pub api: ApiConfig,
    /// Storage settings.
    #[serde(default)]
    pub storage: StorageConfig,
    /// Toast settings.
    #[serde(default)]
    pub toast: ToastConfig,
    /// Log level.
    #[serde(default)]
    pub log_level: Option<String>,
}

/// Errors that can occur during configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Configuration file not found.
    #[error("Configuration file not found: {0}")]
    NotFound(String),

    /// Failed to read configuration file.
    #[error("Failed to read configuration file: {0}")]
    ReadError(String),

    /// Failed to parse configuration file.
    #[error("Failed to parse configuration file: {0}")]
    ParseError(String),

    /// Invalid configuration value.
    #[error("Invalid configuration value: {0}")]
    InvalidValue(String),
}

/// Result type for configuration operations.
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

impl ClientConfig {
    /// Load configuration from a TOML file.
    pub fn load_from_file(path: &Path) -> ConfigResult<Self> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.display().to_string()));
        }

        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::ReadError(format!("{}: {}", path.display(), e)))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::ParseError(format!("{}: {}", path.display(), e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a TOML file.
    pub fn save_to_file(&self, path: &Path) -> ConfigResult<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::ParseError(format!("Failed to serialize: {}", e)))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| ConfigError::ReadError(format!("Failed to create directory: {}", e)))?;
        }

        std::fs::write(path, content)
            .map_err(|e| ConfigError::ReadError(format!("Failed to write file: {}", e)))?;

        Ok(())
    }

    /// Checks values that deserialize fine but cannot be used.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.api.base_url.trim().is_empty() {
            return Err(ConfigError::InvalidValue("api.base_url must not be empty".to_string()));
        }
        if self.api.timeout_secs == 0 {
            return Err(ConfigError::InvalidValue("api.timeout_secs must be positive".to_string()));
        }
        Ok(())
    }

    /// Returns the GoBarber home directory (`~/.gobarber`).
    #[allow(clippy::disallowed_methods)]
    pub fn home_dir() -> PathBuf {
        std::env::var("HOME").map(PathBuf::from).unwrap_or_else(|_| PathBuf::from(".")).join(".gobarber")
    }

    /// Get default global configuration file path.
    pub fn default_global_path() -> PathBuf {
        Self::home_dir().join("config.toml")
    }

    /// Get default local configuration file path.
    pub fn default_local_path() -> PathBuf {
        PathBuf::from(".gobarberrc")
    }

    /// Get default session file path.
    pub fn default_session_file() -> PathBuf {
        Self::home_dir().join("session.json")
    }

    /// Discover and load configuration files, then apply environment overrides.
    ///
    /// Loads configuration from:
    /// 1. Global config (~/.gobarber/config.toml)
    /// 2. Local config (./.gobarberrc)
    ///
    /// Local config overrides global config. Files that fail to parse are
    /// skipped with a warning.
    pub fn discover_and_load() -> Self {
        let mut config = Self::default();

        for path in [Self::default_global_path(), Self::default_local_path()] {
            match Self::load_from_file(&path) {
                Ok(file_config) => config.merge(&file_config),
                Err(ConfigError::NotFound(_)) => {}
                Err(e) => tracing::warn!(error = %e, "Ignoring configuration file"),
            }
        }

        config.apply_env_overrides();
        config
    }

    /// Applies `GOBARBER_API_URL` and `GOBARBER_SESSION_FILE` if set.
    #[allow(clippy::disallowed_methods)]
    pub fn apply_env_overrides(&mut self) {
        if let Ok(url) = std::env::var(API_URL_ENV) {
            if !url.trim().is_empty() {
                self.api.base_url = url;
            }
        }
        if let Ok(path) = std::env::var(SESSION_FILE_ENV) {
            if !path.trim().is_empty() {
                self.storage.session_file = Some(PathBuf::from(path));
            }
        }
    }

    /// Merge another configuration into this one.
    ///
    /// Values from `other` override values in `self` if they are set and
    /// differ from the defaults.
    pub fn merge(&mut self, other: &Self) {
        if other.api.base_url != DEFAULT_API_URL {
            self.api.base_url = other.api.base_url.clone();
        }
        if other.api.timeout_secs != DEFAULT_TIMEOUT_SECS {
            self.api.timeout_secs = other.api.timeout_secs;
        }
        if let Some(ref session_file) = other.storage.session_file {
            self.storage.session_file = Some(session_file.clone());
        }
        if other.toast.duration_ms != DEFAULT_TOAST_DURATION_MS {
            self.toast.duration_ms = other.toast.duration_ms;
        }
        if let Some(ref log_level) = other.log_level {
            self.log_level = Some(log_level.clone());
        }
    }
}
