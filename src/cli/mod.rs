//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for Shroud using clap.

pub mod commands;

use crate::anonymization::OperatorType;
use crate::config::ShroudConfig;
use crate::service::AnonymizerService;
use clap::{Parser, Subcommand};

/// Shroud - PII anonymization engine
#[derive(Parser, Debug)]
#[command(name = "shroud")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "shroud.toml", env = "SHROUD_CONFIG")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "SHROUD_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Anonymize a request `{text, analyzer_results, anonymizers}`
    Anonymize(commands::request::RequestArgs),

    /// Deanonymize a request `{text, entities, deanonymizers}`
    Deanonymize(commands::request::RequestArgs),

    /// List anonymize operators
    Anonymizers(commands::operators::ListArgs),

    /// List deanonymize operators
    Deanonymizers(commands::operators::ListArgs),

    /// Show the genz example and a live sample
    Preview(commands::preview::PreviewArgs),

    /// Print the availability message
    Health(commands::preview::HealthArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),
}

impl Commands {
    /// Whether the command runs requests and so needs a loaded configuration
    pub fn needs_service(&self) -> bool {
        !matches!(self, Self::ValidateConfig(_) | Self::Init(_))
    }
}

impl Cli {
    /// Execute the parsed command
    ///
    /// `config` is the already loaded configuration; the configuration
    /// commands work from `self.config` instead.
    pub fn execute(&self, config: &ShroudConfig) -> anyhow::Result<i32> {
        let service = || AnonymizerService::new(&config.engine);
        match &self.command {
            Commands::Anonymize(args) => args.execute_anonymize(&service()?),
            Commands::Deanonymize(args) => args.execute_deanonymize(&service()?),
            Commands::Anonymizers(args) => args.execute(&service()?, OperatorType::Anonymize),
            Commands::Deanonymizers(args) => {
                args.execute(&service()?, OperatorType::Deanonymize)
            }
            Commands::Preview(args) => args.execute(&service()?),
            Commands::Health(args) => args.execute(&service()?),
            Commands::ValidateConfig(args) => args.execute(&self.config),
            Commands::Init(args) => args.execute(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_anonymize() {
        let cli = Cli::parse_from(["shroud", "anonymize", "--input", "request.json"]);
        assert_eq!(cli.config, "shroud.toml");
        match cli.command {
            Commands::Anonymize(args) => assert_eq!(args.input, "request.json"),
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_cli_parse_input_defaults_to_stdin() {
        let cli = Cli::parse_from(["shroud", "deanonymize"]);
        match cli.command {
            Commands::Deanonymize(args) => assert_eq!(args.input, "-"),
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_cli_parse_with_config() {
        let cli = Cli::parse_from(["shroud", "--config", "custom.toml", "health"]);
        assert_eq!(cli.config, "custom.toml");
    }

    #[test]
    fn test_cli_parse_with_log_level() {
        let cli = Cli::parse_from(["shroud", "--log-level", "debug", "anonymizers"]);
        assert_eq!(cli.log_level, Some("debug".to_string()));
    }

    #[test]
    fn test_cli_parse_validate_config() {
        let cli = Cli::parse_from(["shroud", "validate-config"]);
        assert!(matches!(cli.command, Commands::ValidateConfig(_)));
        assert!(!cli.command.needs_service());
    }

    #[test]
    fn test_cli_parse_init() {
        let cli = Cli::parse_from(["shroud", "init", "--force"]);
        assert!(matches!(cli.command, Commands::Init(ref args) if args.force));
    }

    #[test]
    fn test_execute_health() {
        let cli = Cli::parse_from(["shroud", "health"]);
        assert_eq!(cli.execute(&ShroudConfig::default()).unwrap(), 0);
    }
}
