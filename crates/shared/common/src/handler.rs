//! Boundary error handler.
//!
//! [`handle_exception`] is the single place where errors become
//! [`Failure`]s. The remaining functions derive what presentation needs from
//! a failure's kind and code: a message for the apprentice, whether a retry
//! makes sense, how long to wait, and what to try next. Every function is
//! pure apart from diagnostic logging and never panics.

use std::error::Error as StdError;
use std::num::{ParseFloatError, ParseIntError};
use std::str::Utf8Error;
use std::string::FromUtf8Error;
use std::time::Duration;

use domain::codes::{
    DATA_FORMAT_ERROR, DATA_STATE_ERROR, DB_SYSTEM_ERROR, NET_TIMEOUT, STOR_SYSTEM_ERROR,
    SYSTEM_UNEXPECTED_ERROR, UNKNOWN, VAL_SYSTEM_ERROR,
};
use domain::{AppException, ExceptionCategory, ExceptionKind, Failure, FailureInfo, FailureKind};

use crate::catalog::{catalog, VALIDATION_SUGGESTION};
use crate::error::SystemError;
use crate::retry::RetryPolicy;

/// Translate any error into a [`Failure`].
///
/// Domain exceptions map one-to-one onto the matching failure variant. Other
/// errors are classified by type; see [`classify`].
pub fn handle_exception(error: &(dyn StdError + 'static)) -> Failure {
    if let Some(exception) = error.downcast_ref::<AppException>() {
        tracing::warn!(
            code = exception.code(),
            category = %exception.category(),
            source = ?exception.original_error().map(|e| e.to_string()),
            "{}",
            exception.message()
        );
        return from_app_exception(exception);
    }

    let (kind, code, label) = classify(error);
    tracing::error!(
        code,
        kind = %kind,
        category = %ExceptionCategory::Unknown,
        "{}: {}",
        label,
        error
    );
    Failure::from_info(
        kind,
        FailureInfo {
            message: format!("{}: {}", label, error),
            code: Some(code.to_string()),
            original_error: Some(error.to_string()),
        },
    )
}

fn from_app_exception(exception: &AppException) -> Failure {
    let info = FailureInfo {
        message: exception.message().to_string(),
        code: Some(exception.code().to_string()),
        original_error: exception.original_error().map(|e| e.to_string()),
    };
    match exception.kind() {
        ExceptionKind::Database(_) => Failure::Database(info),
        ExceptionKind::Auth(_) => Failure::Auth(info),
        ExceptionKind::Validation { field_errors, .. } => Failure::Validation {
            info,
            field_errors: field_errors.clone(),
        },
        ExceptionKind::Data(_) => Failure::Data(info),
        ExceptionKind::Storage(_) => Failure::Storage(info),
        ExceptionKind::Network(_) => Failure::Network(info),
        ExceptionKind::Configuration(_) => Failure::Configuration(info),
    }
}

/// Failure kind, fixed code and message label for a non-domain error.
pub fn classify(error: &(dyn StdError + 'static)) -> (FailureKind, &'static str, &'static str) {
    const DATABASE: (FailureKind, &str, &str) =
        (FailureKind::Database, DB_SYSTEM_ERROR, "Database error");
    const FORMAT: (FailureKind, &str, &str) =
        (FailureKind::Data, DATA_FORMAT_ERROR, "Data format error");
    const TIMEOUT: (FailureKind, &str, &str) =
        (FailureKind::Network, NET_TIMEOUT, "Operation timed out");

    if let Some(system) = error.downcast_ref::<SystemError>() {
        return match system {
            SystemError::DatabaseEngine(_) => DATABASE,
            SystemError::InvalidArgument(_) => {
                (FailureKind::Validation, VAL_SYSTEM_ERROR, "Invalid argument")
            }
            SystemError::InvalidState(_) => (FailureKind::Data, DATA_STATE_ERROR, "Invalid state"),
            SystemError::Timeout(_) => TIMEOUT,
        };
    }

    #[cfg(feature = "database")]
    if error.is::<sea_orm::DbErr>() {
        return DATABASE;
    }

    if let Some(io) = error.downcast_ref::<std::io::Error>() {
        return match io.kind() {
            std::io::ErrorKind::TimedOut => TIMEOUT,
            _ => (FailureKind::Storage, STOR_SYSTEM_ERROR, "File system error"),
        };
    }

    if error.is::<serde_json::Error>()
        || error.is::<chrono::ParseError>()
        || error.is::<ParseIntError>()
        || error.is::<ParseFloatError>()
        || error.is::<Utf8Error>()
        || error.is::<FromUtf8Error>()
    {
        return FORMAT;
    }

    (FailureKind::Data, SYSTEM_UNEXPECTED_ERROR, "Unexpected error")
}

/// Message safe to show to the apprentice.
///
/// A validation failure with field errors yields its first field error
/// verbatim. Otherwise the code (or `UNKNOWN`) is looked up in the kind's
/// table, falling back to the kind's generic message.
pub fn user_friendly_message(failure: &Failure) -> String {
    if let Some((_, message)) = failure.field_errors().and_then(|errors| errors.first()) {
        return message.to_string();
    }
    let table = catalog(failure.kind());
    let code = failure.code().unwrap_or(UNKNOWN);
    table
        .message(code)
        .unwrap_or(table.generic_message)
        .to_string()
}

/// Whether retrying without user correction makes sense.
///
/// Validation and configuration failures never are. Other kinds consult
/// their code table; unknown codes are recoverable.
pub fn is_recoverable(failure: &Failure) -> bool {
    let recoverable = catalog(failure.kind()).is_recoverable(failure.code().unwrap_or(UNKNOWN));
    tracing::debug!(kind = %failure.kind(), code = ?failure.code(), recoverable, "Recoverability checked");
    recoverable
}

/// Delay before retry number `attempt_count`.
///
/// Callers pass `attempt_count >= 1`; the value is not checked.
pub fn retry_delay(failure: &Failure, attempt_count: u32) -> Duration {
    RetryPolicy::for_kind(failure.kind()).delay(attempt_count)
}

/// One or two actionable suggestions for the failure.
pub fn recovery_suggestions(failure: &Failure) -> Vec<String> {
    if failure.kind() == FailureKind::Validation {
        return vec![VALIDATION_SUGGESTION.to_string()];
    }
    catalog(failure.kind())
        .suggestions(failure.code().unwrap_or(UNKNOWN))
        .iter()
        .map(|s| s.to_string())
        .collect()
}

/// Presentation helpers on [`Failure`].
pub trait FailureExt {
    fn user_message(&self) -> String;
    fn is_recoverable(&self) -> bool;
    fn retry_delay(&self, attempt_count: u32) -> Duration;
    fn recovery_suggestions(&self) -> Vec<String>;
}

impl FailureExt for Failure {
    fn user_message(&self) -> String {
        user_friendly_message(self)
    }

    fn is_recoverable(&self) -> bool {
        is_recoverable(self)
    }

    fn retry_delay(&self, attempt_count: u32) -> Duration {
        retry_delay(self, attempt_count)
    }

    fn recovery_suggestions(&self) -> Vec<String> {
        recovery_suggestions(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::{DatabaseCode, FieldErrors, ValidationCode};

    #[test]
    fn test_validation_message_prefers_first_field_error() {
        let failure = Failure::validation(
            "invalid",
            [("email", "bad email"), ("name", "too short")].into_iter().collect(),
        )
        .with_code("VAL_001");
        assert_eq!(user_friendly_message(&failure), "bad email");
    }

    #[test]
    fn test_validation_without_fields_uses_table() {
        let failure = Failure::validation("invalid", FieldErrors::new()).with_code("VAL_006");
        assert_eq!(user_friendly_message(&failure), "Please enter a valid email address.");
    }

    #[test]
    fn test_missing_code_falls_back_to_generic() {
        let failure = Failure::network("offline");
        assert_eq!(
            user_friendly_message(&failure),
            "A connection error occurred. Please try again."
        );
    }

    #[test]
    fn test_exception_round_trip_keeps_code() {
        let exception = AppException::validation(
            ValidationCode::RequiredField,
            "name missing",
            [("name", "This field is required")].into_iter().collect(),
        );
        let failure = handle_exception(&exception);
        assert_eq!(failure.code(), Some("VAL_001"));
        assert_eq!(user_friendly_message(&failure), "This field is required");

        let exception = AppException::database(DatabaseCode::ConnectionFailed, "no handle");
        let failure = handle_exception(&exception);
        assert_eq!(
            failure.user_message(),
            "Unable to connect to the local database. Please restart the app."
        );
        assert!(failure.is_recoverable());
    }

    #[test]
    fn test_classify_unknown_error() {
        #[derive(Debug, thiserror::Error)]
        #[error("kaboom")]
        struct Kaboom;

        let (kind, code, _) = classify(&Kaboom);
        assert_eq!(kind, FailureKind::Data);
        assert_eq!(code, SYSTEM_UNEXPECTED_ERROR);
    }
}
