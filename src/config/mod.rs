//! Configuration management for Shroud.
//!
//! This module provides TOML-based configuration loading, parsing, and validation.
//!
//! # Overview
//!
//! Shroud uses an optional TOML configuration file with support for:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - `SHROUD_*` environment overrides
//! - Default operator configs applied to every request
//! - Validation of those defaults against the built-in operators
//!
//! # Configuration Structure
//!
//! - [`ApplicationConfig`] - Application settings (log level)
//! - [`EngineConfig`] - Random seed, encryption key, default operator configs
//! - [`LoggingConfig`] - Logging configuration
//!
//! # Example Configuration
//!
//! ```toml
//! [application]
//! log_level = "info"
//!
//! [engine]
//! encryption_key = "${SHROUD_KEY}"
//!
//! [engine.anonymizers.PHONE_NUMBER]
//! type = "mask"
//! masking_char = "*"
//! chars_to_mask = 4
//! from_end = true
//!
//! [engine.anonymizers.DEFAULT]
//! type = "replace"
//!
//! [engine.deanonymizers.DEFAULT]
//! type = "decrypt"
//! ```
//!
//! # Validation
//!
//! ```rust,no_run
//! use shroud::config::load_config;
//!
//! # fn example() {
//! match load_config("shroud.toml") {
//!     Ok(_) => println!("Configuration valid"),
//!     Err(e) => eprintln!("Configuration error: {}", e),
//! }
//! # }
//! ```

pub mod loader;
pub mod schema;
pub mod secret;

// Re-export commonly used types
pub use loader::{load_config, load_config_or_default};
pub use schema::{ApplicationConfig, Direction, EngineConfig, LoggingConfig, ShroudConfig};
pub use secret::{secret_string, SecretString, SecretValue};
