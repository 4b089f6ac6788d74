//! Thread-safe configuration storage.
//!
//! The proxy reads the config at request time so a reload takes effect on
//! the next request without restarting the server.

use parking_lot::RwLock;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::config::loader::ConfigError;
use crate::config::types::Config;

/// Thread-safe config container with interior mutability.
#[derive(Clone)]
pub struct ConfigStore {
    inner: Arc<RwLock<Config>>,
    path: PathBuf,
}

impl ConfigStore {
    pub fn new(config: Config, path: PathBuf) -> Self {
        Self {
            inner: Arc::new(RwLock::new(config)),
            path,
        }
    }

    /// Get a clone of the current config.
    pub fn get(&self) -> Config {
        self.inner.read().clone()
    }

    /// Reload config from the file.
    ///
    /// On failure, keeps the old config and returns the error.
    pub fn reload(&self) -> Result<(), ConfigError> {
        match Config::load_from(&self.path) {
            Ok(config) => {
                *self.inner.write() = config;
                tracing::info!(path = %self.path.display(), "Configuration reloaded");
                Ok(())
            }
            Err(e) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %e,
                    "Config reload failed, keeping current configuration"
                );
                Err(e)
            }
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
