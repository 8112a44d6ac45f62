//! CLI module - Command-line interface for the tracker's boundary layer.
//!
//! Provides commands for:
//! - `validate` - Check a JSON form submission
//! - `explain` - Describe an error code

pub mod args;

pub use args::{Cli, Commands};
