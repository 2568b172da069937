// Coupe - Local cocktail image catalog
// Copyright (c) 2025 Coupe Contributors
// Licensed under the MIT License

use clap::Parser;
use coupe::cli::Cli;
use coupe::config::{load_config_or_default, LoggingConfig};
use coupe::logging::init_logging;
use std::process;

#[tokio::main]
async fn main() {
    // Optional; a missing .env file is ignored
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    // Configuration problems are reported by the command itself, so logging
    // falls back to console-only defaults here
    let (config_level, logging_config) = match load_config_or_default(&cli.config) {
        Ok(config) => (config.application.log_level, config.logging),
        Err(_) => ("info".to_string(), LoggingConfig::default()),
    };
    let log_level = cli.log_level.clone().unwrap_or(config_level);

    let guard = match init_logging(&log_level, &logging_config) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            process::exit(2);
        }
    };

    tracing::debug!(
        version = env!("CARGO_PKG_VERSION"),
        "Coupe - Local cocktail image catalog"
    );

    let exit_code = match cli.command.execute(&cli.config).await {
        Ok(code) => code,
        Err(e) => {
            tracing::error!(error = %e, "Command execution failed");
            eprintln!("Error: {e}");
            5
        }
    };

    // process::exit skips destructors; flush file logs first
    drop(guard);
    process::exit(exit_code);
}
