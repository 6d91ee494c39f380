//! Init command implementation
//!
//! This module implements the `init` command for generating a sample
//! configuration file.

use super::{EXIT_CONFIG, EXIT_FATAL};
use clap::Args;
use std::fs;
use std::path::Path;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the configuration file
    #[arg(short, long, default_value = "shroud.toml")]
    pub output: String,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output, "Initializing configuration file");

        if Path::new(&self.output).exists() && !self.force {
            println!("❌ Configuration file already exists: {}", self.output);
            println!("   Use --force to overwrite");
            return Ok(EXIT_CONFIG);
        }

        match fs::write(&self.output, Self::generate_config()) {
            Ok(_) => {
                println!("✅ Configuration file created: {}", self.output);
                println!();
                println!("Next steps:");
                println!("  1. Edit {} with your operator defaults", self.output);
                println!("  2. Set SHROUD_KEY in your environment or .env file");
                println!("  3. Validate configuration: shroud validate-config");
                println!();
                Ok(0)
            }
            Err(e) => {
                println!("❌ Failed to write configuration file");
                println!("   Error: {e}");
                Ok(EXIT_FATAL)
            }
        }
    }

    /// Sample configuration with comments
    fn generate_config() -> String {
        r#"# Shroud Configuration File

# ============================================================================
# Application Settings
# ============================================================================
[application]
# Log level (trace, debug, info, warn, error)
log_level = "info"

# ============================================================================
# Engine Defaults
# ============================================================================
[engine]
# Fixed seed for randomized operators such as genz.
# Leave unset in production.
# random_seed = 42

# Key for encrypt / decrypt configs that do not carry one (16, 24 or 32 bytes)
encryption_key = "${SHROUD_KEY}"

# Operator used for entity types a request does not configure.
# Without a DEFAULT entry, entities are replaced by <ENTITY_TYPE>.
[engine.anonymizers.DEFAULT]
type = "replace"

[engine.anonymizers.PHONE_NUMBER]
type = "mask"
masking_char = "*"
chars_to_mask = 4
from_end = true

[engine.deanonymizers.DEFAULT]
type = "decrypt"

# ============================================================================
# Logging Configuration
# ============================================================================
[logging]
# Enable local JSON file logging
local_enabled = false

# Local log directory
local_path = "./logs"

# Log rotation (daily or hourly)
local_rotation = "daily"
"#
        .to_string()
    }
}
