use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::config::types::{Config, Endpoint};

/// Environment variables consulted for the service key, in priority order.
pub const API_KEY_ENV_VARS: &[&str] = &["HAMMOCK_API_KEY", "OPENAI_API_KEY"];

/// Overrides the configured model.
pub const MODEL_ENV_VAR: &str = "HAMMOCK_MODEL";

/// Overrides the configured service base URL.
pub const BASE_URL_ENV_VAR: &str = "HAMMOCK_BASE_URL";

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file '{path}': {source}")]
    ParseError {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Config validation failed: {message}")]
    ValidationError { message: String },
}

impl Config {
    /// Returns the path to the configuration file.
    ///
    /// Uses `~/.config/hammock/config.toml` on Unix, or the platform
    /// equivalent via `dirs::config_dir()`. Falls back to the current
    /// directory if no config dir is available.
    pub fn config_path() -> PathBuf {
        let config_dir = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        config_dir.join("hammock").join("config.toml")
    }

    /// Loads configuration from the default path plus environment overrides.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::config_path())
    }

    /// Loads configuration from `path`, then applies environment overrides
    /// and validates.
    ///
    /// A missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let mut config = if path.exists() {
            let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
                path: path.to_path_buf(),
                source: e,
            })?;

            toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.to_path_buf(),
                source: e,
            })?
        } else {
            tracing::debug!(path = %path.display(), "Config file not found, using defaults");
            Config::default()
        };

        config.apply_env_overrides(|name| std::env::var(name).ok());
        config.validate()?;
        Ok(config)
    }

    /// Apply environment overrides using `lookup` to read variables.
    ///
    /// Empty values are ignored.
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        if let Some(key) = API_KEY_ENV_VARS.iter().find_map(|name| non_empty(*name)) {
            self.service.api_key = Some(key);
        }
        if let Some(model) = non_empty(MODEL_ENV_VAR) {
            self.service.model = model;
        }
        if let Some(base_url) = non_empty(BASE_URL_ENV_VAR) {
            self.service.base_url = base_url;
        }
    }

    /// Validates the configuration.
    ///
    /// Checks:
    /// - Model and base URL are set
    /// - Timeouts and poll interval are positive
    /// - Proxy bind address parses
    /// - Direct mode has a usable credential
    pub fn validate(&self) -> Result<(), ConfigError> {
        let fail = |message: String| Err(ConfigError::ValidationError { message });

        if self.service.model.trim().is_empty() {
            return fail("service.model must not be empty".to_string());
        }
        if self.service.base_url.trim().is_empty() {
            return fail("service.base_url must not be empty".to_string());
        }
        if self.service.timeout_seconds == 0 {
            return fail("service.timeout_seconds must be greater than 0".to_string());
        }
        if self.panel.poll_interval_ms == 0 {
            return fail("panel.poll_interval_ms must be greater than 0".to_string());
        }
        if let Err(e) = self.proxy.bind_addr.parse::<SocketAddr>() {
            return fail(format!(
                "Invalid proxy.bind_addr '{}': {}",
                self.proxy.bind_addr, e
            ));
        }
        if self.panel.endpoint == Endpoint::Direct && !self.service.is_configured() {
            return fail(
                "panel.endpoint = \"direct\" requires an API key (HAMMOCK_API_KEY or OPENAI_API_KEY)"
                    .to_string(),
            );
        }

        Ok(())
    }
}
