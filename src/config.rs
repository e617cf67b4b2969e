//! Client configuration.
//!
//! Settings are layered: built-in defaults, then an optional TOML file, then
//! `HRMS__<KEY>` environment variables, and finally the `HRMS_API_URL`
//! override for the backend address.

use ::config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

/// Backend address used when nothing else is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";

/// Environment variable that overrides the backend address.
pub const API_URL_ENV: &str = "HRMS_API_URL";

/// Settings for talking to the HRMS backend.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Base URL of the backend, without the `/api` prefix
    pub base_url: String,
    /// Request deadline in seconds
    pub timeout_secs: u64,
    /// How long a notification stays visible, in milliseconds
    pub notification_ttl_ms: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 10,
            notification_ttl_ms: 3000,
        }
    }
}

/// Errors that can occur when loading client configuration.
#[derive(Debug, Error)]
pub enum ConfigLoadError {
    /// The configuration file was not found.
    #[error("configuration file not found: {0}")]
    FileNotFound(String),

    /// The configuration could not be parsed.
    #[error("failed to parse configuration: {0}")]
    ParseError(#[from] ConfigError),

    /// The configuration file path is invalid.
    #[error("invalid configuration path: {0}")]
    InvalidPath(String),
}

impl ClientConfig {
    /// Request deadline as a `Duration`.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Notification lifetime as a `Duration`.
    pub fn notification_ttl(&self) -> Duration {
        Duration::from_millis(self.notification_ttl_ms)
    }

    /// Load configuration, honoring the `HRMS_API_URL` override.
    ///
    /// # Errors
    ///
    /// Returns an error if the given file does not exist or any source
    /// cannot be parsed.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigLoadError> {
        let api_url = std::env::var(API_URL_ENV)
            .ok()
            .filter(|url| !url.trim().is_empty());
        Self::load_with_override(path, api_url)
    }

    /// Load configuration with an explicit base URL override.
    pub fn load_with_override(
        path: Option<&Path>,
        base_url: Option<String>,
    ) -> Result<Self, ConfigLoadError> {
        let defaults = Self::default();
        let mut builder = Config::builder()
            .set_default("base_url", defaults.base_url)?
            .set_default("timeout_secs", defaults.timeout_secs)?
            .set_default("notification_ttl_ms", defaults.notification_ttl_ms)?;

        if let Some(path) = path {
            let path_str = path
                .to_str()
                .ok_or_else(|| ConfigLoadError::InvalidPath(format!("{:?}", path)))?;
            if !path.exists() {
                return Err(ConfigLoadError::FileNotFound(path_str.to_string()));
            }
            builder = builder.add_source(File::with_name(path_str));
        }

        let config = builder
            // Use double underscore as separator, e.g. HRMS__TIMEOUT_SECS=30
            .add_source(
                Environment::with_prefix("HRMS")
                    .separator("__")
                    .try_parsing(true),
            )
            .set_override_option("base_url", base_url)?
            .build()?;

        let client_config: ClientConfig = config.try_deserialize()?;
        tracing::debug!(
            base_url = %client_config.base_url,
            timeout_secs = client_config.timeout_secs,
            "Loaded client configuration"
        );
        Ok(client_config)
    }
}
