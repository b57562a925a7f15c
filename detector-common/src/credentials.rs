//! Detection service credential loading
//!
//! Credentials are resolved once at startup from two tiers:
//!
//! 1. Environment (`SIGHTENGINE_API_USER`, `SIGHTENGINE_API_SECRET`)
//! 2. Secrets TOML file (`[sightengine]` table)
//!
//! Each key is resolved independently, environment first. Failure is terminal
//! for the session: the caller shows [`setup_instructions`] and never starts
//! handling uploads.

use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, warn};

/// Environment variable for the API user
pub const ENV_API_USER: &str = "SIGHTENGINE_API_USER";
/// Environment variable for the API secret
pub const ENV_API_SECRET: &str = "SIGHTENGINE_API_SECRET";

/// Fully qualified key name of the API user
pub const KEY_API_USER: &str = "sightengine.api_user";
/// Fully qualified key name of the API secret
pub const KEY_API_SECRET: &str = "sightengine.api_secret";

const SECRETS_TABLE: &str = "sightengine";

/// Detection service credentials
///
/// Immutable after load. `Debug` never prints the secret.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    user_id: String,
    secret: String,
}

impl Credentials {
    pub fn new(user_id: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            secret: secret.into(),
        }
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn secret(&self) -> &str {
        &self.secret
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("user_id", &self.user_id)
            .field("secret", &"<redacted>")
            .finish()
    }
}

/// Credential loading failure
#[derive(Debug, Error)]
pub enum ConfigurationError {
    /// Secrets file absent and the environment does not supply every key
    #[error("Secrets file not found: {}", .0.display())]
    SecretsFileNotFound(PathBuf),

    /// Required key absent (or blank) in every source
    #[error("Detection service credential `{0}` not configured")]
    MissingKey(&'static str),

    /// Secrets file is not valid TOML
    #[error("Failed to parse secrets file: {0}")]
    Parse(String),

    /// Secrets file exists but cannot be read
    #[error("Failed to read secrets file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Credential values taken from the environment
#[derive(Debug, Clone, Default)]
pub struct EnvCredentials {
    pub api_user: Option<String>,
    pub api_secret: Option<String>,
}

impl EnvCredentials {
    /// Read both variables from the process environment
    pub fn from_env() -> Self {
        Self {
            api_user: std::env::var(ENV_API_USER).ok(),
            api_secret: std::env::var(ENV_API_SECRET).ok(),
        }
    }
}

/// Load credentials from the process environment and the secrets file
pub fn load_credentials(secrets_file: &Path) -> Result<Credentials, ConfigurationError> {
    resolve_credentials(EnvCredentials::from_env(), secrets_file)
}

/// Resolve credentials from explicit environment values and the secrets file
pub fn resolve_credentials(
    env: EnvCredentials,
    secrets_file: &Path,
) -> Result<Credentials, ConfigurationError> {
    let env_user = env.api_user.filter(|v| is_valid_key(v));
    let env_secret = env.api_secret.filter(|v| is_valid_key(v));

    let file = match read_secrets_file(secrets_file)? {
        Some(table) => Some(table),
        None if env_user.is_some() && env_secret.is_some() => None,
        None => {
            return Err(ConfigurationError::SecretsFileNotFound(
                secrets_file.to_path_buf(),
            ))
        }
    };

    let file_user = file.as_ref().and_then(|t| secret_value(t, "api_user"));
    let file_secret = file.as_ref().and_then(|t| secret_value(t, "api_secret"));

    let user_id = pick(KEY_API_USER, env_user, file_user)?;
    let secret = pick(KEY_API_SECRET, env_secret, file_secret)?;

    Ok(Credentials::new(user_id, secret))
}

/// Validate credential value (non-empty, non-whitespace)
pub fn is_valid_key(key: &str) -> bool {
    !key.trim().is_empty()
}

/// Setup guidance shown when credentials cannot be loaded
pub fn setup_instructions(secrets_file: &Path) -> String {
    format!(
        "Create a file named `{}` with the following content:\n\
         \n\
         [{table}]\n\
         api_user = \"YOUR_API_USER\"\n\
         api_secret = \"YOUR_API_SECRET\"\n\
         \n\
         or set the environment variables {} and {}, then restart the service.",
        secrets_file.display(),
        ENV_API_USER,
        ENV_API_SECRET,
        table = SECRETS_TABLE,
    )
}

fn read_secrets_file(path: &Path) -> Result<Option<toml::Value>, ConfigurationError> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(source) => {
            return Err(ConfigurationError::Io {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    let value = toml::from_str::<toml::Value>(&content)
        .map_err(|e| ConfigurationError::Parse(e.to_string()))?;

    Ok(Some(value))
}

fn secret_value(root: &toml::Value, key: &str) -> Option<String> {
    root.get(SECRETS_TABLE)
        .and_then(|table| table.get(key))
        .and_then(toml::Value::as_str)
        .filter(|v| is_valid_key(v))
        .map(str::to_string)
}

fn pick(
    key: &'static str,
    env_value: Option<String>,
    file_value: Option<String>,
) -> Result<String, ConfigurationError> {
    match (env_value, file_value) {
        (Some(env_value), file_value) => {
            if file_value.is_some() {
                warn!(
                    "Credential {} found in environment and secrets file. Using environment.",
                    key
                );
            }
            info!("Credential {} loaded from environment", key);
            Ok(env_value)
        }
        (None, Some(file_value)) => {
            info!("Credential {} loaded from secrets file", key);
            Ok(file_value)
        }
        (None, None) => Err(ConfigurationError::MissingKey(key)),
    }
}
