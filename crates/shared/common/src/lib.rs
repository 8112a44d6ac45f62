//! Boundary utilities shared by every front end.
//!
//! This crate provides:
//! - Translation of any error into a `Failure`
//! - Message, recoverability and suggestion lookup tables
//! - Retry back-off per failure kind
//! - Configuration and tracing setup

pub mod catalog;
pub mod config;
pub mod error;
pub mod handler;
pub mod retry;
pub mod telemetry;

pub use config::{AppConfig, LogConfig};
pub use error::{FailureResult, IntoFailure, SystemError};
pub use handler::{
    handle_exception, is_recoverable, recovery_suggestions, retry_delay, user_friendly_message,
    FailureExt,
};
pub use retry::RetryPolicy;
pub use telemetry::init_tracing;
