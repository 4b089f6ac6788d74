#![allow(dead_code, unused_imports)]

pub mod fake_host;
pub mod fake_service;
pub mod mock_backend;

pub use fake_host::FakeHost;
pub use fake_service::FakeService;
pub use mock_backend::{CapturedRequest, MockBackend, MockResponse};

use hammock::config::{Config, ServiceConfig};

/// Service settings pointing at `base_url` with a test key.
pub fn service_config(base_url: &str) -> ServiceConfig {
    ServiceConfig {
        base_url: base_url.to_string(),
        api_key: Some("sk-test-key".to_string()),
        timeout_seconds: 5,
        ..ServiceConfig::default()
    }
}

/// Full config whose service is `base_url` and whose proxy binds any free port.
pub fn test_config(base_url: &str) -> Config {
    let mut config = Config {
        service: service_config(base_url),
        ..Config::default()
    };
    config.proxy.bind_addr = "127.0.0.1:0".to_string();
    config
}
