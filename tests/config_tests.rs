// Config loading and validation tests

use deskpulse::config::{AppConfig, OutputFormat};
use std::sync::Mutex;

static ENV_LOCK: Mutex<()> = Mutex::new(());

const VALID_CONFIG: &str = r#"
[monitoring]
sample_interval_ms = 500
max_history = 60
stats_log_interval_secs = 30

[external_ip]
enabled = true
url = "http://127.0.0.1:9999/ip"
timeout_secs = 3

[display]
format = "json"
clear_screen = false
"#;

#[test]
fn test_config_loads_from_str() {
    let config = AppConfig::load_from_str(VALID_CONFIG).expect("load_from_str");
    assert_eq!(config.monitoring.sample_interval_ms, 500);
    assert_eq!(config.monitoring.max_history, 60);
    assert_eq!(config.monitoring.stats_log_interval_secs, 30);
    assert!(config.external_ip.enabled);
    assert_eq!(config.external_ip.url, "http://127.0.0.1:9999/ip");
    assert_eq!(config.external_ip.timeout_secs, 3);
    assert_eq!(config.display.format, OutputFormat::Json);
    assert!(!config.display.clear_screen);
}

#[test]
fn test_config_defaults_when_empty() {
    let config = AppConfig::load_from_str("").expect("empty config is valid");
    assert_eq!(config.monitoring.sample_interval_ms, 1000);
    assert_eq!(config.monitoring.max_history, 100);
    assert_eq!(config.external_ip.timeout_secs, 5);
    assert_eq!(config.external_ip.url, "https://api.ipify.org?format=json");
    assert_eq!(config.display.format, OutputFormat::Text);
    assert!(config.display.clear_screen);
}

#[test]
fn test_config_partial_section_keeps_other_defaults() {
    let config = AppConfig::load_from_str("[monitoring]\nmax_history = 10\n").expect("valid");
    assert_eq!(config.monitoring.max_history, 10);
    assert_eq!(config.monitoring.sample_interval_ms, 1000);
}

#[test]
fn test_config_validation_rejects_sample_interval_zero() {
    let bad = VALID_CONFIG.replace("sample_interval_ms = 500", "sample_interval_ms = 0");
    let err = AppConfig::load_from_str(&bad).unwrap_err();
    assert!(err.to_string().contains("sample_interval_ms"));
}

#[test]
fn test_config_validation_rejects_max_history_zero() {
    let bad = VALID_CONFIG.replace("max_history = 60", "max_history = 0");
    let err = AppConfig::load_from_str(&bad).unwrap_err();
    assert!(err.to_string().contains("max_history"));
}

#[test]
fn test_config_validation_rejects_stats_log_interval_zero() {
    let bad = VALID_CONFIG.replace(
        "stats_log_interval_secs = 30",
        "stats_log_interval_secs = 0",
    );
    let err = AppConfig::load_from_str(&bad).unwrap_err();
    assert!(err.to_string().contains("stats_log_interval_secs"));
}

#[test]
fn test_config_validation_rejects_empty_url_when_enabled() {
    let bad = VALID_CONFIG.replace("url = \"http://127.0.0.1:9999/ip\"", "url = \"\"");
    let err = AppConfig::load_from_str(&bad).unwrap_err();
    assert!(err.to_string().contains("external_ip.url"));
}

#[test]
fn test_config_validation_rejects_timeout_zero_when_enabled() {
    let bad = VALID_CONFIG.replace("timeout_secs = 3", "timeout_secs = 0");
    let err = AppConfig::load_from_str(&bad).unwrap_err();
    assert!(err.to_string().contains("timeout_secs"));
}

#[test]
fn test_config_disabled_lookup_skips_url_checks() {
    let cfg = VALID_CONFIG
        .replace("enabled = true", "enabled = false")
        .replace("timeout_secs = 3", "timeout_secs = 0");
    let config = AppConfig::load_from_str(&cfg).expect("disabled lookup is not validated");
    assert!(!config.external_ip.enabled);
}

#[test]
fn test_config_rejects_unknown_format() {
    let bad = VALID_CONFIG.replace("format = \"json\"", "format = \"xml\"");
    assert!(AppConfig::load_from_str(&bad).is_err());
}

#[test]
fn test_config_validation_rejects_invalid_toml() {
    let err = AppConfig::load_from_str("not valid toml [[[").unwrap_err();
    assert!(!err.to_string().is_empty());
}

#[test]
fn test_config_load_from_file_via_env() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, VALID_CONFIG).unwrap();
    let _guard = ENV_LOCK.lock().unwrap();
    unsafe { std::env::set_var("CONFIG_FILE", path.to_str().unwrap()) };
    let result = AppConfig::load();
    unsafe { std::env::remove_var("CONFIG_FILE") };
    let config = result.expect("load from CONFIG_FILE");
    assert_eq!(config.monitoring.sample_interval_ms, 500);
    assert_eq!(config.display.format, OutputFormat::Json);
}

#[test]
fn test_config_explicit_missing_file_is_an_error() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("absent.toml");
    let _guard = ENV_LOCK.lock().unwrap();
    unsafe { std::env::set_var("CONFIG_FILE", path.to_str().unwrap()) };
    let result = AppConfig::load();
    unsafe { std::env::remove_var("CONFIG_FILE") };
    let err = result.unwrap_err();
    assert!(err.to_string().contains("absent.toml"));
}
