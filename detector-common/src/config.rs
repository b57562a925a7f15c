//! Bootstrap configuration for the detector services
//!
//! Settings sources, highest priority first:
//!
//! 1. Command-line arguments (--port, --secrets, --log-level)
//! 2. Environment variables (handled by clap `env` fallbacks in the binary)
//! 3. TOML configuration file
//! 4. Built-in defaults (code constants)
//!
//! A missing TOML file is not an error: the caller logs a warning and starts
//! with defaults. A TOML file that exists but cannot be parsed is an error.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Sightengine check endpoint
pub const DEFAULT_DETECTION_ENDPOINT: &str = "https://api.sightengine.com/1.0/check.json";

/// Hard timeout for a single detection request
pub const DEFAULT_DETECTION_TIMEOUT_SECS: u64 = 20;

/// Default HTTP port for detector-web
pub const DEFAULT_PORT: u16 = 5730;

/// Default secrets file, relative to the working directory
pub const DEFAULT_SECRETS_FILE: &str = ".config/secrets.toml";

/// Bootstrap configuration loaded from TOML file
///
/// These settings cannot change during runtime. The service must restart
/// to pick up changes.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct TomlConfig {
    /// Bind address for the HTTP server
    #[serde(default = "default_host")]
    pub host: String,

    /// HTTP server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Path to the secrets file holding the detection service credentials
    #[serde(default = "default_secrets_file")]
    pub secrets_file: PathBuf,

    /// Maximum accepted upload body size in bytes
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: usize,

    /// Remote detection service settings
    #[serde(default)]
    pub detection: DetectionConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Remote detection service settings
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct DetectionConfig {
    /// Check endpoint URL
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

fn default_secrets_file() -> PathBuf {
    PathBuf::from(DEFAULT_SECRETS_FILE)
}

fn default_max_upload_bytes() -> usize {
    25 * 1024 * 1024
}

fn default_endpoint() -> String {
    DEFAULT_DETECTION_ENDPOINT.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_DETECTION_TIMEOUT_SECS
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for TomlConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            secrets_file: default_secrets_file(),
            max_upload_bytes: default_max_upload_bytes(),
            detection: DetectionConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

/// Command-line configuration overrides
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub port: Option<u16>,
    pub secrets_file: Option<PathBuf>,
    pub log_level: Option<String>,
}

impl TomlConfig {
    /// Apply command-line overrides on top of file/default values
    pub fn with_overrides(mut self, overrides: ConfigOverrides) -> Self {
        if let Some(port) = overrides.port {
            self.port = port;
        }
        if let Some(secrets_file) = overrides.secrets_file {
            self.secrets_file = secrets_file;
        }
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
        self
    }

    /// Reject values the service cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.detection.timeout_secs == 0 {
            return Err(Error::InvalidInput(
                "detection.timeout_secs must be greater than zero".to_string(),
            ));
        }
        if self.max_upload_bytes == 0 {
            return Err(Error::InvalidInput(
                "max_upload_bytes must be greater than zero".to_string(),
            ));
        }
        if self.detection.endpoint.trim().is_empty() {
            return Err(Error::InvalidInput(
                "detection.endpoint must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Detection request timeout as Duration
    pub fn detection_timeout(&self) -> Duration {
        Duration::from_secs(self.detection.timeout_secs)
    }
}

/// Load bootstrap configuration from a TOML file
///
/// Returns `Ok(None)` when the file does not exist so the caller can warn
/// and fall back to defaults.
pub fn load_toml_config(path: &Path) -> Result<Option<TomlConfig>> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(Error::Io(e)),
    };

    let config: TomlConfig = toml::from_str(&content)
        .map_err(|e| Error::Config(format!("Failed to parse {}: {}", path.display(), e)))?;

    Ok(Some(config))
}

/// Default bootstrap configuration path for the platform
///
/// `<config dir>/detector/detector.toml`, or `detector.toml` in the working
/// directory when the platform has no config directory.
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .map(|d| d.join("detector").join("detector.toml"))
        .unwrap_or_else(|| PathBuf::from("detector.toml"))
}
