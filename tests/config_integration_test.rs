//! Integration tests for configuration loading and validation
//!
//! Tests that modify environment variables hold `ENV_MUTEX`.

use rust_decimal_macros::dec;
use secrecy::ExposeSecret;
use std::io::Write;
use std::sync::Mutex;
use tempfile::NamedTempFile;
use weclapp_export::config::{load_config, load_config_or_env};
use weclapp_export::domain::ReportError;

// Mutex to serialize tests that modify environment variables
static ENV_MUTEX: Mutex<()> = Mutex::new(());

/// Helper function to clean up environment variables
fn cleanup_env_vars() {
    for name in [
        "WECLAPP_LOG_LEVEL",
        "WECLAPP_BASE_URL",
        "WECLAPP_API_TOKEN",
        "WECLAPP_TIMEOUT_SECONDS",
        "WECLAPP_PAGE_SIZE",
        "WECLAPP_EXPORT_DIR",
        "WECLAPP_EXPORT_FILE_PREFIX",
        "WECLAPP_EXPORT_WINDOW_OFFSET_WEEKS",
        "WECLAPP_LOGGING_LOCAL_ENABLED",
        "WECLAPP_LOGGING_LOCAL_PATH",
        "TEST_WECLAPP_TOKEN",
    ] {
        std::env::remove_var(name);
    }
}

fn write_config(contents: &str) -> NamedTempFile {
    let mut temp_file = NamedTempFile::new().unwrap();
    temp_file.write_all(contents.as_bytes()).unwrap();
    temp_file.flush().unwrap();
    temp_file
}

#[test]
fn test_load_complete_config() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();

    let temp_file = write_config(
        r#"
[application]
log_level = "debug"

[weclapp]
base_url = "https://tenant.weclapp.com/webapp/api/v1"
api_token = "file-token"
timeout_seconds = 60
page_size = 250

[export]
output_dir = "/tmp/weclapp"
file_prefix = "orders"
window_offset_weeks = 1
position_status = "completed"

[policy]
allowed_channels = ["Shop DE netto"]
excluded_keywords = ["pfand"]
min_unit_price = "0.50"

[logging]
local_enabled = true
local_path = "/tmp/weclapp/logs"
local_rotation = "hourly"
"#,
    );

    let config = load_config(temp_file.path()).expect("Failed to load config");

    assert_eq!(config.application.log_level, "debug");
    assert_eq!(config.weclapp.base_url, "https://tenant.weclapp.com/webapp/api/v1");
    assert_eq!(config.weclapp.timeout_seconds, 60);
    assert_eq!(config.weclapp.page_size, 250);
    assert_eq!(config.export.output_dir, "/tmp/weclapp");
    assert_eq!(config.export.file_prefix, "orders");
    assert_eq!(config.export.window_offset_weeks, 1);
    assert_eq!(config.export.position_status, "completed");
    assert_eq!(config.policy.allowed_channels, vec!["Shop DE netto".to_string()]);
    assert_eq!(config.policy.excluded_keywords, vec!["pfand".to_string()]);
    assert_eq!(config.policy.min_unit_price, dec!(0.50));
    // Unset policy fields keep their defaults
    assert_eq!(config.policy.completed_status_tokens.len(), 2);
    assert!(config.logging.local_enabled);
    assert_eq!(config.logging.local_rotation, "hourly");
}

#[test]
fn test_load_minimal_config_with_defaults() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();

    let temp_file = write_config(
        r#"
[weclapp]
base_url = "https://tenant.weclapp.com/webapp/api/v1"
api_token = "file-token"
"#,
    );

    let config = load_config(temp_file.path()).expect("Failed to load config");

    assert_eq!(config.application.log_level, "info");
    assert_eq!(config.weclapp.timeout_seconds, 30);
    assert_eq!(config.weclapp.page_size, 100);
    assert_eq!(config.export.output_dir, "exports");
    assert_eq!(config.export.file_prefix, "weclapp_orders");
    assert_eq!(config.export.window_offset_weeks, 2);
    assert_eq!(config.export.position_status, "abgeschlossen");
    assert_eq!(config.policy.allowed_channels.len(), 12);
    assert_eq!(config.policy.excluded_keywords.len(), 8);
    assert_eq!(config.policy.min_unit_price, dec!(0.01));
    assert!(!config.logging.local_enabled);
}

#[test]
fn test_env_var_substitution() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();
    std::env::set_var("TEST_WECLAPP_TOKEN", "substituted-token");

    let temp_file = write_config(
        r#"
[weclapp]
base_url = "https://tenant.weclapp.com/webapp/api/v1"
api_token = "${TEST_WECLAPP_TOKEN}"
"#,
    );

    let config = load_config(temp_file.path()).expect("Failed to load config");
    let token = config.weclapp.api_token.expect("token should be set");
    assert!(token.expose_secret() == "substituted-token");

    cleanup_env_vars();
}

#[test]
fn test_missing_substituted_variable_is_configuration_error() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();

    let temp_file = write_config(
        r#"
[weclapp]
base_url = "https://tenant.weclapp.com/webapp/api/v1"
api_token = "${TEST_WECLAPP_TOKEN}"
"#,
    );

    let err = load_config(temp_file.path()).unwrap_err();
    assert!(matches!(err, ReportError::Configuration(_)));
    assert!(err.to_string().contains("TEST_WECLAPP_TOKEN"));
    assert!(err.is_configuration());
}

#[test]
fn test_env_overrides_file_values() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();
    std::env::set_var("WECLAPP_PAGE_SIZE", "500");
    std::env::set_var("WECLAPP_EXPORT_DIR", "/data/reports");
    std::env::set_var("WECLAPP_LOG_LEVEL", "warn");

    let temp_file = write_config(
        r#"
[weclapp]
base_url = "https://tenant.weclapp.com/webapp/api/v1"
api_token = "file-token"
page_size = 50

[export]
output_dir = "exports"
"#,
    );

    let config = load_config(temp_file.path()).expect("Failed to load config");
    assert_eq!(config.weclapp.page_size, 500);
    assert_eq!(config.export.output_dir, "/data/reports");
    assert_eq!(config.application.log_level, "warn");

    cleanup_env_vars();
}

#[test]
fn test_invalid_numeric_override_is_rejected() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();
    std::env::set_var("WECLAPP_BASE_URL", "https://tenant.weclapp.com/webapp/api/v1");
    std::env::set_var("WECLAPP_API_TOKEN", "env-token");
    std::env::set_var("WECLAPP_TIMEOUT_SECONDS", "soon");

    let err = load_config_or_env("does-not-exist.toml").unwrap_err();
    assert!(err.to_string().contains("WECLAPP_TIMEOUT_SECONDS"));

    cleanup_env_vars();
}

#[test]
fn test_environment_only_configuration() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();
    std::env::set_var("WECLAPP_BASE_URL", "https://tenant.weclapp.com/webapp/api/v1");
    std::env::set_var("WECLAPP_API_TOKEN", "env-token");

    let config = load_config_or_env("does-not-exist.toml").expect("env config should load");
    assert_eq!(config.weclapp.base_url, "https://tenant.weclapp.com/webapp/api/v1");
    assert_eq!(config.export.window_offset_weeks, 2);

    cleanup_env_vars();
}

#[test]
fn test_environment_only_without_connection_fails() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();

    let err = load_config_or_env("does-not-exist.toml").unwrap_err();
    assert!(err.is_configuration());
    assert!(err.to_string().contains("base_url"));
}

#[test]
fn test_validation_rejects_bad_values() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();

    let cases = [
        (
            r#"
[weclapp]
base_url = "ftp://tenant.weclapp.com"
api_token = "t"
"#,
            "http",
        ),
        (
            r#"
[weclapp]
base_url = "https://tenant.weclapp.com/webapp/api/v1"
"#,
            "api_token",
        ),
        (
            r#"
[weclapp]
base_url = "https://tenant.weclapp.com/webapp/api/v1"
api_token = "t"
page_size = 0
"#,
            "page_size",
        ),
        (
            r#"
[weclapp]
base_url = "https://tenant.weclapp.com/webapp/api/v1"
api_token = "t"

[policy]
min_unit_price = "-1"
"#,
            "min_unit_price",
        ),
        (
            r#"
[weclapp]
base_url = "https://tenant.weclapp.com/webapp/api/v1"
api_token = "t"

[logging]
local_rotation = "weekly"
"#,
            "local_rotation",
        ),
    ];

    for (contents, expected) in cases {
        let temp_file = write_config(contents);
        let err = load_config(temp_file.path()).unwrap_err();
        assert!(
            err.to_string().contains(expected),
            "expected '{expected}' in '{err}'"
        );
    }
}
