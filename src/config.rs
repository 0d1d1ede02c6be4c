//! Configuration module
//!
//! Read from a TOML file (`~/.config/bcrypt-verifier/config.toml` by default,
//! or the path in `BCRYPT_VERIFIER_CONFIG`). Every section is optional.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::application::verifier::{SecretLengthPolicy, Verifier};
use crate::support::errors::ConfigError;

/// Environment variable holding the config file path.
pub const CONFIG_ENV: &str = "BCRYPT_VERIFIER_CONFIG";
/// Environment variable overriding `check.hash`.
pub const HASH_ENV: &str = "BCRYPT_VERIFIER_HASH";
/// Environment variable overriding `check.secret`.
pub const SECRET_ENV: &str = "BCRYPT_VERIFIER_SECRET";

/// Full application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub verifier: VerifierConfig,
    pub logging: LoggingConfig,
    pub check: CheckConfig,
}

/// Verification behaviour
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct VerifierConfig {
    /// What to do with secrets longer than 72 bytes
    pub secret_length_policy: SecretLengthPolicy,
    /// Give up waiting after this many milliseconds (0 = wait forever)
    pub timeout_ms: u64,
}

impl VerifierConfig {
    pub fn timeout(&self) -> Option<Duration> {
        (self.timeout_ms > 0).then(|| Duration::from_millis(self.timeout_ms))
    }

    pub fn build(&self) -> Verifier {
        Verifier::new(self.secret_length_policy)
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive, overridden by `RUST_LOG`
    pub level: String,
    /// "text" or "json"
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "text".to_string(),
        }
    }
}

/// The hash/secret pair the binary checks
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CheckConfig {
    pub hash: String,
    pub secret: String,
}

impl Default for CheckConfig {
    fn default() -> Self {
        Self {
            hash: "$2a$10$D3AOObVxJq4T3VjWp7R2U.CeoTjpgLEA.vpHQ/L8clQjAXqFk.eIO".to_string(),
            secret: "34ba56f38983bb7f1d32bc6a0c6d54a0".to_string(),
        }
    }
}

impl AppConfig {
    /// Load and validate the config file at `path`.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Like [`AppConfig::load`], but a missing file yields the defaults.
    ///
    /// Any other failure (unreadable file, bad TOML, invalid values) is
    /// returned: falling back would silently replace the user's `[check]`.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        match Self::load(path) {
            Err(ConfigError::Io { source, .. }) if source.kind() == ErrorKind::NotFound => {
                Ok(Self::default())
            }
            other => other,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        match self.logging.format.to_lowercase().as_str() {
            "text" | "json" => {}
            other => {
                return Err(ConfigError::Invalid(format!(
                    "logging.format must be \"text\" or \"json\", got {:?}",
                    other
                )))
            }
        }
        if self.logging.level.trim().is_empty() {
            return Err(ConfigError::Invalid("logging.level is empty".to_string()));
        }
        Ok(())
    }

    /// Apply `BCRYPT_VERIFIER_HASH` / `BCRYPT_VERIFIER_SECRET`.
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(hash) = lookup(HASH_ENV) {
            self.check.hash = hash;
        }
        if let Some(secret) = lookup(SECRET_ENV) {
            self.check.secret = secret;
        }
    }
}

/// `~/.config/bcrypt-verifier/config.toml` (platform equivalent elsewhere)
pub fn default_config_path() -> PathBuf {
    dirs_next::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("bcrypt-verifier")
        .join("config.toml")
}

/// Config path from `BCRYPT_VERIFIER_CONFIG`, falling back to
/// [`default_config_path`].
pub fn config_path_from_env() -> PathBuf {
    std::env::var(CONFIG_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|_| default_config_path())
}
