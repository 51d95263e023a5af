//! # Application Configuration
//!
//! Built once at startup from the process environment and carried inside
//! [`crate::state::AppState`]. There is no global configuration.
//!
//! | Variable                  | Default | Meaning                              |
//! |---------------------------|---------|--------------------------------------|
//! | `PORT`                    | `8080`  | TCP port to bind on `0.0.0.0`        |
//! | `APP_SECRET_KEY`          | unset   | Application secret, never echoed     |
//! | `SAFEWEB_METRICS_ENABLED` | `true`  | Mount `/metrics` and record metrics  |
//! | `SAFEWEB_LOG_FORMAT`      | `text`  | `text` or `json` log output          |

use std::fmt;

use thiserror::Error;
use zeroize::Zeroizing;

const DEFAULT_PORT: u16 = 8080;

/// Error while reading configuration from the environment.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// `PORT` is set but not a valid port number.
    #[error("invalid PORT value '{0}': expected an integer in 1..=65535")]
    InvalidPort(String),

    /// `SAFEWEB_LOG_FORMAT` is set to an unknown format.
    #[error("invalid SAFEWEB_LOG_FORMAT value '{0}': expected 'text' or 'json'")]
    InvalidLogFormat(String),
}

/// Application secret loaded from the environment.
///
/// Zeroized on drop. `Debug` prints `[REDACTED]`. No handler reads the
/// value; only its presence is reported.
#[derive(Clone)]
pub struct SecretKey(Zeroizing<String>);

impl SecretKey {
    /// Wrap a secret value.
    pub fn new(value: impl Into<String>) -> Self {
        Self(Zeroizing::new(value.into()))
    }

    #[cfg(test)]
    pub(crate) fn expose(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SecretKey([REDACTED])")
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Text,
    /// One JSON object per event.
    Json,
}

impl std::str::FromStr for LogFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err(ConfigError::InvalidLogFormat(s.to_string())),
        }
    }
}

/// Runtime configuration for the API service.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Port the HTTP server binds to.
    pub port: u16,
    /// Application secret. `None` when unset or blank.
    pub secret_key: Option<SecretKey>,
    /// Whether request metrics are recorded and `/metrics` is mounted.
    pub metrics_enabled: bool,
    /// Log output format.
    pub log_format: LogFormat,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            secret_key: None,
            metrics_enabled: true,
            log_format: LogFormat::Text,
        }
    }
}

impl AppConfig {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let port = match lookup("PORT") {
            Some(raw) => match raw.trim().parse::<u16>() {
                Ok(port) if port != 0 => port,
                _ => return Err(ConfigError::InvalidPort(raw)),
            },
            None => DEFAULT_PORT,
        };

        let secret_key = lookup("APP_SECRET_KEY")
            .filter(|v| !v.trim().is_empty())
            .map(SecretKey::new);

        let metrics_enabled = lookup("SAFEWEB_METRICS_ENABLED")
            .map(|v| !v.trim().eq_ignore_ascii_case("false"))
            .unwrap_or(true);

        let log_format = match lookup("SAFEWEB_LOG_FORMAT") {
            Some(raw) => raw.parse()?,
            None => LogFormat::default(),
        };

        Ok(Self {
            port,
            secret_key,
            metrics_enabled,
            log_format,
        })
    }
}
