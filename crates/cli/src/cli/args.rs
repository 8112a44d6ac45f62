//! CLI argument definitions.

use std::path::PathBuf;

use clap::builder::PossibleValuesParser;
use clap::{Parser, Subcommand};
use domain::forms::FORM_NAMES;

/// Apprentice Tracker - validate form submissions and explain error codes
#[derive(Parser, Debug)]
#[command(name = "apprentice-check")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Validate a JSON form submission
    Validate(ValidateArgs),

    /// Show the message, recoverability and suggestions for an error code
    Explain(ExplainArgs),
}

/// Arguments for the validate command
#[derive(Parser, Debug)]
pub struct ValidateArgs {
    /// Form to validate against
    #[arg(value_parser = PossibleValuesParser::new(FORM_NAMES.iter().copied()))]
    pub form: String,

    /// JSON object with the submitted fields, or `-` for stdin
    pub input: PathBuf,

    /// Print the result as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the explain command
#[derive(Parser, Debug)]
pub struct ExplainArgs {
    /// Error code, e.g. NET_002
    pub code: String,

    /// Number of retry delays to show for recoverable codes
    #[arg(long, default_value = "3")]
    pub attempts: u32,
}
