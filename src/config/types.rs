use serde::{Deserialize, Serialize};

/// Root configuration container.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub service: ServiceConfig,
    #[serde(default)]
    pub proxy: ProxyConfig,
    #[serde(default)]
    pub panel: PanelConfig,
}

/// Text-generation service the transformations are sent to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Base URL for the API (e.g., "https://api.openai.com").
    #[serde(default = "default_service_base_url")]
    pub base_url: String,
    /// Model identifier sent with every request.
    #[serde(default = "default_model")]
    pub model: String,
    /// Authentication type: "bearer" or "none".
    #[serde(rename = "auth_type", default = "default_auth_type")]
    pub auth_type_str: String,
    /// API key. Usually left out of the file and supplied via environment.
    #[serde(default)]
    pub api_key: Option<String>,
    /// Total request timeout in seconds (default: 60).
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u32,
    /// Connection timeout in seconds (default: 5).
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_seconds: u32,
}

/// Server-side proxy that holds the service credential.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProxyConfig {
    /// Bind address for the proxy server (host:port).
    #[serde(default = "default_proxy_bind_addr")]
    pub bind_addr: String,
    /// When set, panel clients must present `Authorization: Bearer <token>`.
    #[serde(default)]
    pub access_token: Option<String>,
}

/// Where the panel sends its completion requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Endpoint {
    /// Through the credential-holding proxy.
    #[default]
    Proxy,
    /// Straight to the service; the panel process needs the credential.
    Direct,
}

/// Side-panel behaviour.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PanelConfig {
    /// Selection poll period in milliseconds (default: 100).
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
    #[serde(default)]
    pub endpoint: Endpoint,
    /// Proxy base URL used when `endpoint = "proxy"`.
    #[serde(default = "default_proxy_url")]
    pub proxy_url: String,
}

fn default_service_base_url() -> String {
    "https://api.openai.com".to_string()
}

fn default_model() -> String {
    "gpt-3.5-turbo".to_string()
}

fn default_auth_type() -> String {
    "bearer".to_string()
}

fn default_timeout() -> u32 {
    60
}

fn default_connect_timeout() -> u32 {
    5
}

fn default_proxy_bind_addr() -> String {
    "127.0.0.1:8787".to_string()
}

fn default_poll_interval_ms() -> u64 {
    crate::panel::DEFAULT_POLL_INTERVAL.as_millis() as u64
}

fn default_proxy_url() -> String {
    "http://127.0.0.1:8787".to_string()
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            base_url: default_service_base_url(),
            model: default_model(),
            auth_type_str: default_auth_type(),
            api_key: None,
            timeout_seconds: default_timeout(),
            connect_timeout_seconds: default_connect_timeout(),
        }
    }
}

impl Default for ProxyConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_proxy_bind_addr(),
            access_token: None,
        }
    }
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: default_poll_interval_ms(),
            endpoint: Endpoint::default(),
            proxy_url: default_proxy_url(),
        }
    }
}
