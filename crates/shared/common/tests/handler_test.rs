//! Boundary handler tests: exception mapping and lookup tables.

use std::io;
use std::time::Duration;

use common::{
    handle_exception, is_recoverable, recovery_suggestions, retry_delay, user_friendly_message,
    SystemError,
};
use domain::{
    AppException, AuthCode, ConfigurationCode, DataCode, DatabaseCode, Failure, FailureKind,
    FieldErrors, NetworkCode, StorageCode, ValidationCode,
};

fn cause() -> io::Error {
    io::Error::new(io::ErrorKind::Other, "disk unplugged")
}

#[test]
fn test_every_exception_variant_maps_one_to_one() {
    let cases = [
        (
            AppException::database(DatabaseCode::QueryFailed, "query failed"),
            FailureKind::Database,
            "DB_001",
        ),
        (
            AppException::auth(AuthCode::SessionExpired, "session expired"),
            FailureKind::Auth,
            "AUTH_003",
        ),
        (
            AppException::validation(ValidationCode::InvalidEmail, "bad input", FieldErrors::new()),
            FailureKind::Validation,
            "VAL_006",
        ),
        (
            AppException::data(DataCode::Conflict, "stale entry"),
            FailureKind::Data,
            "DATA_005",
        ),
        (
            AppException::storage(StorageCode::InsufficientSpace, "disk full"),
            FailureKind::Storage,
            "STOR_004",
        ),
        (
            AppException::network(NetworkCode::RateLimited, "slow down"),
            FailureKind::Network,
            "NET_007",
        ),
        (
            AppException::configuration(ConfigurationCode::Missing, "no api key"),
            FailureKind::Configuration,
            "CONF_001",
        ),
    ];

    for (exception, kind, code) in cases {
        let message = exception.message().to_string();
        let failure = handle_exception(&exception.with_source(cause()));
        assert_eq!(failure.kind(), kind);
        assert_eq!(failure.code(), Some(code));
        assert_eq!(failure.message(), message);
        assert_eq!(failure.original_error(), Some("disk unplugged"));
    }
}

#[test]
fn test_validation_exception_keeps_field_errors() {
    let errors: FieldErrors = [("email", "bad email"), ("name", "too short")]
        .into_iter()
        .collect();
    let exception =
        AppException::validation(ValidationCode::FormInvalid, "form invalid", errors.clone());
    let failure = handle_exception(&exception);
    assert_eq!(failure.field_errors(), Some(&errors));
    assert_eq!(failure.original_error(), None);
}

#[test]
fn test_foreign_errors_map_to_fixed_codes() {
    let json = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
    let timeout = io::Error::new(io::ErrorKind::TimedOut, "read timed out");
    let cases: Vec<(Box<dyn std::error::Error>, FailureKind, &str)> = vec![
        (
            Box::new(SystemError::database_engine("database is locked")),
            FailureKind::Database,
            "DB_SYSTEM_ERROR",
        ),
        (Box::new(cause()), FailureKind::Storage, "STOR_SYSTEM_ERROR"),
        (Box::new(json), FailureKind::Data, "DATA_FORMAT_ERROR"),
        (
            Box::new("12x".parse::<i32>().unwrap_err()),
            FailureKind::Data,
            "DATA_FORMAT_ERROR",
        ),
        (
            Box::new(SystemError::invalid_argument("negative hours")),
            FailureKind::Validation,
            "VAL_SYSTEM_ERROR",
        ),
        (
            Box::new(SystemError::invalid_state("log already closed")),
            FailureKind::Data,
            "DATA_STATE_ERROR",
        ),
        (
            Box::new(SystemError::Timeout(Duration::from_secs(5))),
            FailureKind::Network,
            "NET_TIMEOUT",
        ),
        (Box::new(timeout), FailureKind::Network, "NET_TIMEOUT"),
        (
            Box::new(std::fmt::Error),
            FailureKind::Data,
            "SYSTEM_UNEXPECTED_ERROR",
        ),
    ];

    for (error, kind, code) in cases {
        let failure = handle_exception(error.as_ref());
        assert_eq!(failure.kind(), kind, "{error}");
        assert_eq!(failure.code(), Some(code), "{error}");
        assert!(failure.message().ends_with(&error.to_string()));
        assert_eq!(failure.original_error(), Some(error.to_string().as_str()));
    }
}

#[test]
fn test_first_field_error_wins_regardless_of_code() {
    for code in ["VAL_001", "VAL_008", "NOT_A_CODE"] {
        let failure = Failure::validation("invalid", [("email", "bad email")].into_iter().collect())
            .with_code(code);
        assert_eq!(user_friendly_message(&failure), "bad email");
    }
}

#[test]
fn test_unknown_code_uses_kind_generic_message() {
    let failure = Failure::database("boom").with_code("DB_999");
    assert_eq!(
        user_friendly_message(&failure),
        "A database error occurred. Please try again."
    );
}

#[test]
fn test_configuration_and_validation_never_recoverable() {
    for code in ["CONF_001", "CONF_005", "CONF_999", "VAL_001", "DB_002"] {
        assert!(!is_recoverable(&Failure::configuration("x").with_code(code)));
        assert!(!is_recoverable(
            &Failure::validation("x", FieldErrors::new()).with_code(code)
        ));
    }
    assert!(!is_recoverable(&Failure::configuration("x")));
}

#[test]
fn test_recoverability_table() {
    assert!(is_recoverable(&Failure::database("x").with_code("DB_002")));
    assert!(!is_recoverable(&Failure::database("x").with_code("DB_004")));
    assert!(!is_recoverable(&Failure::auth("x").with_code("AUTH_005")));
    assert!(is_recoverable(&Failure::network("x").with_code("NET_001")));
    assert!(is_recoverable(&Failure::storage("x").with_code("STOR_999")));
    assert!(is_recoverable(&Failure::data("x")));
}

#[test]
fn test_network_delay_is_clamped() {
    let failure = Failure::network("offline");
    for n in 1..=30u64 {
        let expected = Duration::from_secs((2 * n).clamp(1, 30));
        assert_eq!(retry_delay(&failure, n as u32), expected, "attempt {n}");
    }
    assert_eq!(retry_delay(&failure, 50), Duration::from_secs(30));
}

#[test]
fn test_retry_delay_per_kind() {
    assert_eq!(
        retry_delay(&Failure::storage("x"), 3),
        Duration::from_millis(1500)
    );
    assert_eq!(retry_delay(&Failure::auth("x"), 25), Duration::from_secs(60));
    assert_eq!(retry_delay(&Failure::data("x"), 7), Duration::from_secs(7));
    assert_eq!(
        retry_delay(&Failure::configuration("x"), 45),
        Duration::from_secs(30)
    );
}

#[test]
fn test_recovery_suggestions() {
    let validation = Failure::validation("x", [("name", "too short")].into_iter().collect());
    assert_eq!(
        recovery_suggestions(&validation),
        vec!["Correct the highlighted fields and submit again".to_string()]
    );

    let full = Failure::storage("x").with_code("STOR_004");
    assert_eq!(
        recovery_suggestions(&full),
        vec![
            "Free up space on your device".to_string(),
            "Delete unused apps or files".to_string(),
        ]
    );

    let unknown = Failure::data("x").with_code("DATA_999");
    assert_eq!(
        recovery_suggestions(&unknown),
        vec![
            "Try again".to_string(),
            "Contact support if the problem persists".to_string(),
        ]
    );
}

#[test]
fn test_handling_is_deterministic() {
    let exception = AppException::network(NetworkCode::Timeout, "took too long");
    let first = handle_exception(&exception);
    let second = handle_exception(&exception);
    assert_eq!(first, second);
    assert_eq!(user_friendly_message(&first), user_friendly_message(&second));
    assert_eq!(recovery_suggestions(&first), recovery_suggestions(&second));
}

#[cfg(feature = "database")]
#[test]
fn test_sea_orm_errors_map_to_db_system_error() {
    let error = sea_orm::DbErr::Custom("database is locked".to_string());
    let failure = handle_exception(&error);
    assert_eq!(failure.kind(), FailureKind::Database);
    assert_eq!(failure.code(), Some("DB_SYSTEM_ERROR"));
    assert!(failure.message().starts_with("Database error: "));
    assert_eq!(failure.original_error(), Some(error.to_string().as_str()));
}
