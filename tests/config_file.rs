//! Config file loading tests.

use std::fs;

use hammock::config::{Config, ConfigError, ConfigStore, Endpoint};
use tempfile::TempDir;

#[test]
fn test_missing_file_yields_defaults() {
    let dir = TempDir::new().unwrap();
    let config = Config::load_from(&dir.path().join("absent.toml")).unwrap();

    assert_eq!(config.proxy.bind_addr, "127.0.0.1:8787");
    assert_eq!(config.panel.poll_interval_ms, 100);
    assert_eq!(config.panel.endpoint, Endpoint::Proxy);
    assert_eq!(config.service.timeout_seconds, 60);
}

#[test]
fn test_reads_all_sections() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(
        &path,
        r#"
[service]
timeout_seconds = 20
connect_timeout_seconds = 3

[proxy]
bind_addr = "0.0.0.0:9000"
access_token = "panel-token"

[panel]
poll_interval_ms = 250
proxy_url = "http://10.0.0.2:9000"
"#,
    )
    .unwrap();

    let config = Config::load_from(&path).unwrap();
    assert_eq!(config.service.timeout_seconds, 20);
    assert_eq!(config.service.connect_timeout_seconds, 3);
    assert_eq!(config.proxy.bind_addr, "0.0.0.0:9000");
    assert_eq!(config.proxy.access_token.as_deref(), Some("panel-token"));
    assert_eq!(config.panel.poll_interval_ms, 250);
    assert_eq!(config.panel.proxy_url, "http://10.0.0.2:9000");
}

#[test]
fn test_parse_error_names_the_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, "[service\nmodel = ").unwrap();

    match Config::load_from(&path) {
        Err(ConfigError::ParseError { path: reported, .. }) => assert_eq!(reported, path),
        other => panic!("expected parse error, got {:?}", other.map(|_| ())),
    }
}

#[test]
fn test_invalid_values_fail_validation() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, "[service]\ntimeout_seconds = 0\n").unwrap();

    assert!(matches!(
        Config::load_from(&path),
        Err(ConfigError::ValidationError { .. })
    ));
}

#[test]
fn test_store_reload_keeps_old_config_on_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, "[panel]\npoll_interval_ms = 200\n").unwrap();

    let store = ConfigStore::new(Config::load_from(&path).unwrap(), path.clone());
    assert_eq!(store.path(), path.as_path());
    assert_eq!(store.get().panel.poll_interval_ms, 200);

    fs::write(&path, "[panel]\npoll_interval_ms = 500\n").unwrap();
    store.reload().unwrap();
    assert_eq!(store.get().panel.poll_interval_ms, 500);

    fs::write(&path, "[panel]\npoll_interval_ms = 0\n").unwrap();
    assert!(store.reload().is_err());
    assert_eq!(store.get().panel.poll_interval_ms, 500);
}
