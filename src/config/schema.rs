//! Configuration schema types
//!
//! This module defines the configuration structure that maps to `shroud.toml`.

use crate::anonymization::models::{OperatorConfigs, DEFAULT_ENTITY};
use crate::anonymization::operators::encryption::KEY;
use crate::anonymization::OperatorRegistry;
use crate::config::SecretString;
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};

/// Operators whose `key` param is filled from `engine.encryption_key`
pub const KEYED_OPERATORS: &[&str] = &["encrypt", "decrypt"];

/// Main Shroud configuration
///
/// Every section is optional; an empty file is a valid configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ShroudConfig {
    /// Application-level settings
    #[serde(default)]
    pub application: ApplicationConfig,

    /// Engine defaults
    #[serde(default)]
    pub engine: EngineConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl ShroudConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> Result<(), String> {
        self.application.validate()?;
        self.engine.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

/// Application-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl ApplicationConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.as_str()) {
            return Err(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            ));
        }
        Ok(())
    }
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

/// Engine defaults applied to every request
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Fixed seed for randomized operators; entropy-seeded when absent
    #[serde(default)]
    pub random_seed: Option<u64>,

    /// Key used by `encrypt` / `decrypt` configs that carry none
    /// Stored securely in memory and automatically zeroized on drop
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub encryption_key: Option<SecretString>,

    /// Anonymize configs used for entity types a request does not configure
    #[serde(default)]
    pub anonymizers: OperatorConfigs,

    /// Deanonymize configs used for entity types a request does not configure
    #[serde(default)]
    pub deanonymizers: OperatorConfigs,
}

impl EngineConfig {
    fn validate(&self) -> Result<(), String> {
        if let Some(key) = &self.encryption_key {
            let len = key.expose_secret().len();
            if ![16, 24, 32].contains(&len) {
                return Err(format!(
                    "engine.encryption_key must be 16, 24 or 32 bytes long (got {len})"
                ));
            }
        }

        let registry = OperatorRegistry::with_builtins().map_err(|e| e.to_string())?;
        registry
            .validate_anonymizers(&self.complete(&OperatorConfigs::new(), Direction::Anonymize))
            .map_err(|e| format!("engine.anonymizers: {e}"))?;
        registry
            .validate_deanonymizers(
                &self.complete(&OperatorConfigs::new(), Direction::Deanonymize),
            )
            .map_err(|e| format!("engine.deanonymizers: {e}"))?;
        Ok(())
    }

    /// Complete a request's configs with the configured defaults
    ///
    /// Request entries win. A request carrying its own `DEFAULT` covers every
    /// entity type, so no configured table is merged in. `encrypt` / `decrypt`
    /// entries without a `key` receive `encryption_key` when one is configured.
    pub fn complete(&self, request: &OperatorConfigs, direction: Direction) -> OperatorConfigs {
        let defaults = match direction {
            Direction::Anonymize => &self.anonymizers,
            Direction::Deanonymize => &self.deanonymizers,
        };
        let request = request.clone().normalized();
        let mut configs = if request.contains(DEFAULT_ENTITY) {
            request
        } else {
            request.merged_with(&defaults.clone().normalized())
        };
        if let Some(key) = &self.encryption_key {
            configs.fill_missing_param(KEYED_OPERATORS, KEY, key.expose_secret().as_ref());
        }
        configs
    }
}

/// Which default table [`EngineConfig::complete`] draws from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// `engine.anonymizers`
    Anonymize,
    /// `engine.deanonymizers`
    Deanonymize,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Enable local JSON file logging
    #[serde(default)]
    pub local_enabled: bool,

    /// Local log directory
    #[serde(default = "default_local_path")]
    pub local_path: String,

    /// Log rotation strategy (daily, hourly)
    #[serde(default = "default_local_rotation")]
    pub local_rotation: String,
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_rotations = ["daily", "hourly"];
        if !valid_rotations.contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid logging.local_rotation '{}'. Must be one of: {}",
                self.local_rotation,
                valid_rotations.join(", ")
            ));
        }

        if self.local_enabled && self.local_path.is_empty() {
            return Err("logging.local_path cannot be empty when local_enabled = true".to_string());
        }

        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: false,
            local_path: default_local_path(),
            local_rotation: default_local_rotation(),
        }
    }
}

// Default value functions
fn default_log_level() -> String {
    "info".to_string()
}

fn default_local_path() -> String {
    "./logs".to_string()
}

fn default_local_rotation() -> String {
    "daily".to_string()
}
