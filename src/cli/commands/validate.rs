//! Validate config command implementation
//!
//! This module implements the `validate-config` command for validating
//! the Shroud configuration file.

use super::EXIT_CONFIG;
use crate::config::load_config;
use clap::Args;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    ///
    /// Unlike the other commands, a missing file is an error here.
    pub fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Validating configuration");

        println!("🔍 Validating configuration file: {config_path}");
        println!();

        let config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                println!("❌ Configuration validation failed");
                println!("   Error: {e}");
                return Ok(EXIT_CONFIG);
            }
        };

        println!("✅ Configuration is valid");
        println!();
        println!("Configuration Summary:");
        println!("  Log Level: {}", config.application.log_level);
        match config.engine.random_seed {
            Some(seed) => println!("  Random Seed: {seed}"),
            None => println!("  Random Seed: (entropy)"),
        }
        println!(
            "  Encryption Key: {}",
            if config.engine.encryption_key.is_some() {
                "configured"
            } else {
                "not set"
            }
        );
        for (entity_type, operator) in config.engine.anonymizers.iter() {
            println!("  Anonymizer {entity_type}: {}", operator.operator_name);
        }
        for (entity_type, operator) in config.engine.deanonymizers.iter() {
            println!("  Deanonymizer {entity_type}: {}", operator.operator_name);
        }
        if config.logging.local_enabled {
            println!(
                "  File Logging: {} ({})",
                config.logging.local_path, config.logging.local_rotation
            );
        }
        println!();
        Ok(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_missing_file_is_config_error() {
        let args = ValidateArgs {};
        assert_eq!(args.execute("/nonexistent/shroud.toml").unwrap(), EXIT_CONFIG);
    }

    #[test]
    fn test_valid_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"[engine.anonymizers.DEFAULT]\ntype = \"redact\"\n")
            .unwrap();
        file.flush().unwrap();

        let args = ValidateArgs {};
        assert_eq!(
            args.execute(&file.path().to_string_lossy()).unwrap(),
            0
        );
    }

    #[test]
    fn test_unknown_operator_is_config_error() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"[engine.anonymizers.PERSON]\ntype = \"shred\"\n")
            .unwrap();
        file.flush().unwrap();

        let args = ValidateArgs {};
        assert_eq!(
            args.execute(&file.path().to_string_lossy()).unwrap(),
            EXIT_CONFIG
        );
    }
}
