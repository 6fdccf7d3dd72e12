use std::collections::HashMap;

use pretty_assertions::assert_eq;
use salonbook_api::config::ApiConfig;
use tracing::Level;

fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| map.get(key).cloned()
}

#[test]
fn test_defaults_with_only_database_url() {
    let config =
        ApiConfig::from_lookup(lookup(&[("DATABASE_URL", "postgres://localhost/salonbook")]))
            .unwrap();

    assert_eq!(config.host, "0.0.0.0");
    assert_eq!(config.port, 3000);
    assert_eq!(config.database_max_connections, 5);
    assert_eq!(config.log_level, Level::INFO);
    assert_eq!(config.cors_origins, None);
    assert_eq!(config.request_timeout, 30);
    assert_eq!(config.slot_interval_minutes, 30);
    assert_eq!(config.server_addr(), "0.0.0.0:3000");
}

#[test]
fn test_overrides_are_read() {
    let config = ApiConfig::from_lookup(lookup(&[
        ("DATABASE_URL", "postgres://db/salonbook"),
        ("API_HOST", "127.0.0.1"),
        ("API_PORT", "8080"),
        ("LOG_LEVEL", "DEBUG"),
        ("API_CORS_ORIGINS", "https://app.example.com, ,https://admin.example.com"),
        ("SLOT_INTERVAL_MINUTES", "15"),
        ("DATABASE_MAX_CONNECTIONS", "20"),
    ]))
    .unwrap();

    assert_eq!(config.server_addr(), "127.0.0.1:8080");
    assert_eq!(config.log_level, Level::DEBUG);
    assert_eq!(
        config.cors_origins,
        Some(vec![
            "https://app.example.com".to_string(),
            "https://admin.example.com".to_string()
        ])
    );
    assert_eq!(config.slot_interval_minutes, 15);
    assert_eq!(config.database_max_connections, 20);
}

#[test]
fn test_missing_database_url_fails() {
    assert!(ApiConfig::from_lookup(lookup(&[])).is_err());
}

#[test]
fn test_invalid_values_fail() {
    let url = ("DATABASE_URL", "postgres://localhost/salonbook");
    assert!(ApiConfig::from_lookup(lookup(&[url, ("API_PORT", "http")])).is_err());
    assert!(ApiConfig::from_lookup(lookup(&[url, ("SLOT_INTERVAL_MINUTES", "0")])).is_err());
    assert!(ApiConfig::from_lookup(lookup(&[url, ("SLOT_INTERVAL_MINUTES", "-5")])).is_err());
}
