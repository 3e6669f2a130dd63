use std::fs;
use tempfile::TempDir;

use te_monitor_common::config::{Config, DEFAULT_BASE_URL, DEFAULT_INTERVAL_SECS};

#[test]
fn test_config_load_from_toml() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("te-monitor.toml");

    let config_content = r#"
api_token = "tok-123"
test_name = "Checkout availability"
target = "https://shop.example.com"
interval_secs = 900
"#;

    fs::write(&config_path, config_content).unwrap();

    let config = Config::from_file(&config_path).unwrap();

    assert_eq!(config.api_token, "tok-123");
    assert_eq!(config.test_name, "Checkout availability");
    assert_eq!(config.target, "https://shop.example.com");
    assert_eq!(config.interval_secs, 900);
    assert_eq!(config.base_url, DEFAULT_BASE_URL);
    assert!(config.output_dir.is_none());
    config.validate().unwrap();
}

#[test]
fn test_config_file_defaults_interval() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("te-monitor.toml");

    let config_content = r#"
api_token = "tok-123"
test_name = "Checkout availability"
target = "https://shop.example.com"
"#;

    fs::write(&config_path, config_content).unwrap();

    let config = Config::from_file(&config_path).unwrap();
    assert_eq!(config.interval_secs, DEFAULT_INTERVAL_SECS);
}

#[test]
fn test_config_validation_missing_token() {
    let config = Config {
        api_token: String::new(),
        test_name: "t".to_string(),
        target: "https://example.com".to_string(),
        base_url: DEFAULT_BASE_URL.to_string(),
        interval_secs: 3600,
        output_dir: None,
    };

    let err = config.validate().unwrap_err();
    assert!(err.to_string().contains("api_token"));
}

#[test]
fn test_config_validation_zero_interval() {
    let config = Config {
        api_token: "tok".to_string(),
        test_name: "t".to_string(),
        target: "https://example.com".to_string(),
        base_url: DEFAULT_BASE_URL.to_string(),
        interval_secs: 0,
        output_dir: None,
    };

    let err = config.validate().unwrap_err();
    assert!(err.to_string().contains("interval_secs"));
}

#[test]
#[serial_test::serial]
fn test_config_from_env() {
    std::env::set_var("TE_API_TOKEN", "env-token");
    std::env::set_var("TEST_NAME", "Env test");
    std::env::set_var("TARGET", "https://env.example.com");
    std::env::set_var("TEST_INTERVAL", "120");

    let config = Config::from_env();

    std::env::remove_var("TE_API_TOKEN");
    std::env::remove_var("TEST_NAME");
    std::env::remove_var("TARGET");
    std::env::remove_var("TEST_INTERVAL");

    assert_eq!(config.api_token, "env-token");
    assert_eq!(config.test_name, "Env test");
    assert_eq!(config.target, "https://env.example.com");
    assert_eq!(config.interval_secs, 120);
    config.validate().unwrap();
}

#[test]
#[serial_test::serial]
fn test_config_from_env_leaves_missing_values_empty() {
    std::env::remove_var("TE_API_TOKEN");
    std::env::remove_var("TEST_NAME");
    std::env::remove_var("TARGET");
    std::env::remove_var("TEST_INTERVAL");

    let config = Config::from_env();

    assert!(config.api_token.is_empty());
    assert_eq!(config.base_url, DEFAULT_BASE_URL);
    assert_eq!(config.interval_secs, DEFAULT_INTERVAL_SECS);
    assert!(config.validate().is_err());
}
