use clap::Parser;
use shroud::cli::commands::{EXIT_CONFIG, EXIT_FATAL};
use shroud::cli::Cli;
use shroud::config::{load_config_or_default, ShroudConfig};
use shroud::logging::init_logging;
use std::process;

fn main() {
    // Load environment variables from .env file if present
    // This is optional - if .env doesn't exist, it's silently ignored
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    // validate-config reports its own load errors, init needs no config
    let loaded = load_config_or_default(&cli.config);
    let config = match (&loaded, cli.command.needs_service()) {
        (Ok(config), _) => config.clone(),
        (Err(e), true) => {
            eprintln!("Error: {e}");
            process::exit(EXIT_CONFIG);
        }
        (Err(_), false) => ShroudConfig::default(),
    };

    let log_level = cli
        .log_level
        .as_deref()
        .unwrap_or(&config.application.log_level);
    let guard = match init_logging(log_level, &config.logging) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            process::exit(EXIT_FATAL);
        }
    };

    tracing::debug!(version = env!("CARGO_PKG_VERSION"), "Shroud starting");

    let exit_code = match cli.execute(&config) {
        Ok(code) => code,
        Err(e) => {
            tracing::error!(error = %e, "Command execution failed");
            eprintln!("Error: {e:#}");
            EXIT_FATAL
        }
    };

    // Flush the file appender before exiting
    drop(guard);
    process::exit(exit_code);
}
