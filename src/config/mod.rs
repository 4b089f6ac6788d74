//! Configuration: TOML file, environment overrides, credentials, hot reload.

mod auth;
mod credentials;
mod loader;
mod store;
mod types;
mod watcher;

pub use auth::{build_auth_header, AuthHeader};
pub use credentials::{AuthType, CredentialStatus, SecureString};
pub use loader::{ConfigError, API_KEY_ENV_VARS, BASE_URL_ENV_VAR, MODEL_ENV_VAR};
pub use store::ConfigStore;
pub use types::{Config, Endpoint, PanelConfig, ProxyConfig, ServiceConfig};
pub use watcher::{ConfigWatcher, WatcherError, DEFAULT_DEBOUNCE};
