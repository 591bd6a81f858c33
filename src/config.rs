//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::provider::{HttpProviderConfig, DEFAULT_ENTRIES_URL};
use crate::server;

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub provider: ProviderConfig,

    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Remote entry provider configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ProviderConfig {
    #[serde(default = "default_provider_url")]
    pub url: String,

    #[serde(default = "default_request_timeout")]
    pub request_timeout_ms: u64,
}

fn default_provider_url() -> String {
    DEFAULT_ENTRIES_URL.to_string()
}

fn default_request_timeout() -> u64 {
    10_000
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            url: default_provider_url(),
            request_timeout_ms: default_request_timeout(),
        }
    }
}

impl From<&ProviderConfig> for HttpProviderConfig {
    fn from(config: &ProviderConfig) -> Self {
        HttpProviderConfig {
            entries_url: config.url.clone(),
            request_timeout_ms: config.request_timeout_ms,
        }
    }
}

/// Local provider server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3030
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl From<&ServerConfig> for server::ServerConfig {
    fn from(config: &ServerConfig) -> Self {
        server::ServerConfig::new(config.host.clone(), config.port)
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Ok(config)
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// First existing config file in the default locations
    pub fn find_default() -> Option<PathBuf> {
        let config_paths: Vec<PathBuf> = [
            dirs::config_dir().map(|p| p.join("journal").join("config.toml")),
            Some(PathBuf::from("./journal.toml")),
        ]
        .into_iter()
        .flatten()
        .collect();

        Self::find_in(&config_paths)
    }

    fn find_in(paths: &[PathBuf]) -> Option<PathBuf> {
        paths.iter().find(|path| path.exists()).cloned()
    }

    /// Load the given file, or environment-only config when there is none
    ///
    /// A file that exists but cannot be read or parsed is an error, it is
    /// never skipped in favour of defaults.
    pub fn load_optional(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load_with_env(path),
            None => Ok(Self::from_env()),
        }
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(url) = var("JOURNAL_PROVIDER_URL") {
            self.provider.url = url;
        }
        if let Some(timeout) = var("JOURNAL_REQUEST_TIMEOUT_MS") {
            if let Ok(ms) = timeout.parse() {
                self.provider.request_timeout_ms = ms;
            }
        }

        if let Some(host) = var("JOURNAL_SERVER_HOST") {
            self.server.host = host;
        }
        if let Some(port) = var("JOURNAL_SERVER_PORT") {
            if let Ok(p) = port.parse() {
                self.server.port = p;
            }
        }

        if let Some(level) = var("JOURNAL_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = var("JOURNAL_LOG_FORMAT") {
            self.logging.format = format;
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# Journal Configuration
#
# Environment variables override these settings:
# - JOURNAL_PROVIDER_URL
# - JOURNAL_REQUEST_TIMEOUT_MS
# - JOURNAL_SERVER_HOST
# - JOURNAL_SERVER_PORT
# - JOURNAL_LOG_LEVEL
# - JOURNAL_LOG_FORMAT

[provider]
# Entries collection endpoint (GET lists, POST creates)
url = "https://jsonplaceholder.typicode.com/posts"

# Request timeout in milliseconds
request_timeout_ms = 10000

[server]
# Local provider server (`journal serve`)
host = "127.0.0.1"
port = 3030

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"#
    .to_string()
}
