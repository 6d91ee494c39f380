//! Integration tests for configuration loading and validation
//!
//! Note: Tests that modify environment variables hold ENV_MUTEX so they do
//! not interfere with each other.

use secrecy::ExposeSecret;
use shroud::anonymization::OperatorConfigs;
use shroud::config::{load_config, load_config_or_default, Direction};
use std::io::Write;
use std::sync::Mutex;
use tempfile::NamedTempFile;

// Mutex to serialize tests that modify environment variables
static ENV_MUTEX: Mutex<()> = Mutex::new(());

/// Helper function to clean up environment variables
fn cleanup_env_vars() {
    std::env::remove_var("SHROUD_APPLICATION_LOG_LEVEL");
    std::env::remove_var("SHROUD_ENGINE_RANDOM_SEED");
    std::env::remove_var("SHROUD_ENGINE_ENCRYPTION_KEY");
    std::env::remove_var("SHROUD_LOGGING_LOCAL_ENABLED");
    std::env::remove_var("SHROUD_LOGGING_LOCAL_PATH");
    std::env::remove_var("TEST_SHROUD_KEY");
}

fn write_config(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn test_load_complete_config() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();

    let file = write_config(
        r#"
[application]
log_level = "debug"

[engine]
random_seed = 42
encryption_key = "WmZq4t7w!z%C&F)J"

[engine.anonymizers.PHONE_NUMBER]
type = "mask"
masking_char = "*"
chars_to_mask = 4
from_end = true

[engine.anonymizers.DEFAULT]
type = "replace"
new_value = "<REDACTED>"

[engine.deanonymizers.DEFAULT]
type = "decrypt"

[logging]
local_enabled = true
local_path = "/tmp/shroud-logs"
local_rotation = "hourly"
"#,
    );

    let config = load_config(file.path()).unwrap();

    assert_eq!(config.application.log_level, "debug");
    assert_eq!(config.engine.random_seed, Some(42));
    assert_eq!(config.engine.anonymizers.len(), 2);
    let mask = config.engine.anonymizers.config_for("PHONE_NUMBER").unwrap();
    assert_eq!(mask.operator_name, "mask");
    assert_eq!(mask.params.get_str("masking_char"), Some("*"));
    assert!(config.logging.local_enabled);
    assert_eq!(config.logging.local_rotation, "hourly");

    let completed = config
        .engine
        .complete(&OperatorConfigs::new(), Direction::Deanonymize);
    assert_eq!(
        completed.config_for("ANY").unwrap().params.get_str("key"),
        Some("WmZq4t7w!z%C&F)J")
    );
}

#[test]
fn test_empty_file_gives_defaults() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();

    let file = write_config("");
    let config = load_config(file.path()).unwrap();

    assert_eq!(config.application.log_level, "info");
    assert!(config.engine.random_seed.is_none());
    assert!(config.engine.encryption_key.is_none());
    assert!(config.engine.anonymizers.is_empty());
    assert!(!config.logging.local_enabled);
}

#[test]
fn test_missing_file() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();

    let err = load_config("/nonexistent/shroud.toml").unwrap_err();
    assert!(err.to_string().contains("Configuration file not found"));

    let config = load_config_or_default("/nonexistent/shroud.toml").unwrap();
    assert_eq!(config.application.log_level, "info");
}

#[test]
fn test_env_var_substitution() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();
    std::env::set_var("TEST_SHROUD_KEY", "0123456789abcdef0123456789abcdef");

    let file = write_config(
        r#"
[engine]
encryption_key = "${TEST_SHROUD_KEY}"
"#,
    );
    let config = load_config(file.path()).unwrap();
    let key = config.engine.encryption_key.unwrap();
    assert_eq!(key.expose_secret().len(), 32);

    cleanup_env_vars();
}

#[test]
fn test_missing_substitution_var_fails() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();

    let file = write_config(
        r#"
[engine]
encryption_key = "${TEST_SHROUD_KEY}"
"#,
    );
    let err = load_config(file.path()).unwrap_err();
    assert!(err.to_string().contains("TEST_SHROUD_KEY"));
}

#[test]
fn test_env_overrides() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();
    std::env::set_var("SHROUD_APPLICATION_LOG_LEVEL", "warn");
    std::env::set_var("SHROUD_ENGINE_RANDOM_SEED", "7");
    std::env::set_var("SHROUD_ENGINE_ENCRYPTION_KEY", "WmZq4t7w!z%C&F)J");
    std::env::set_var("SHROUD_LOGGING_LOCAL_ENABLED", "true");
    std::env::set_var("SHROUD_LOGGING_LOCAL_PATH", "/var/log/shroud");

    let file = write_config(
        r#"
[application]
log_level = "debug"
"#,
    );
    let config = load_config(file.path()).unwrap();

    assert_eq!(config.application.log_level, "warn");
    assert_eq!(config.engine.random_seed, Some(7));
    assert!(config.engine.encryption_key.is_some());
    assert!(config.logging.local_enabled);
    assert_eq!(config.logging.local_path, "/var/log/shroud");

    cleanup_env_vars();
}

#[test]
fn test_invalid_seed_override_fails() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();
    std::env::set_var("SHROUD_ENGINE_RANDOM_SEED", "forty-two");

    let err = load_config_or_default("/nonexistent/shroud.toml").unwrap_err();
    assert!(err.to_string().contains("SHROUD_ENGINE_RANDOM_SEED"));

    cleanup_env_vars();
}

#[test]
fn test_validation_failures() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();

    let cases = [
        (
            "[application]\nlog_level = \"loud\"\n",
            "Invalid log_level",
        ),
        (
            "[engine]\nencryption_key = \"short\"\n",
            "engine.encryption_key",
        ),
        (
            "[engine.anonymizers.PERSON]\ntype = \"scramble\"\n",
            "engine.anonymizers",
        ),
        (
            "[engine.anonymizers.PERSON]\ntype = \"custom\"\n",
            "not supported",
        ),
        (
            "[engine.deanonymizers.DEFAULT]\ntype = \"decrypt\"\n",
            "engine.deanonymizers",
        ),
        (
            "[logging]\nlocal_rotation = \"weekly\"\n",
            "local_rotation",
        ),
    ];

    for (contents, expected) in cases {
        let file = write_config(contents);
        let err = load_config(file.path()).unwrap_err();
        assert!(
            err.to_string().contains(expected),
            "{contents:?} gave {err}"
        );
    }
}

#[test]
fn test_invalid_toml() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();

    let file = write_config("[engine\nrandom_seed = 1");
    let err = load_config(file.path()).unwrap_err();
    assert!(err.to_string().contains("Failed to parse TOML"));
}
