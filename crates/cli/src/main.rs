//! Apprentice Tracker - command-line entry point.
//!
//! Parses arguments, loads configuration, and dispatches to a command.

use std::io;
use std::process::ExitCode;

use clap::Parser;

use common::{handle_exception, init_tracing, AppConfig, FailureExt, LogConfig};
use tracker_cli::{
    cli::{Cli, Commands},
    commands,
};

fn main() -> ExitCode {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Load configuration; tracing falls back to defaults if it is invalid
    let config = AppConfig::from_env();
    let log = config
        .as_ref()
        .map(|c| c.log.clone())
        .unwrap_or_else(|_| LogConfig::default());
    init_tracing(&log, cli.verbose);

    let config = match config {
        Ok(config) => config,
        Err(e) => {
            let failure = handle_exception(&e);
            eprintln!("error: {}", failure.user_message());
            return ExitCode::FAILURE;
        }
    };
    tracing::debug!(service = %config.service_name, "Configuration loaded");

    // Execute command
    let mut stdout = io::stdout().lock();
    let result = match &cli.command {
        Commands::Validate(args) => commands::validate::execute(args, &config, &mut stdout),
        Commands::Explain(args) => commands::explain::execute(args, &mut stdout),
    };

    // Handle errors
    match result {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(failure) => {
            tracing::error!(kind = %failure.kind(), code = ?failure.code(), "Command failed: {}", failure.message());
            eprintln!("error: {}", failure.user_message());
            for suggestion in failure.recovery_suggestions() {
                eprintln!("hint: {}", suggestion);
            }
            ExitCode::FAILURE
        }
    }
}
