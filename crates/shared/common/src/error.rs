//! Boundary error types.
//!
//! Lower layers that are not part of the domain (storage engines, platform
//! bindings) report through [`SystemError`] or their own error types. At the
//! boundary to presentation every error becomes a [`Failure`].

use std::error::Error as StdError;
use std::time::Duration;

use domain::Failure;
use thiserror::Error;

use crate::handler::handle_exception;

/// Errors raised outside the domain taxonomy.
#[derive(Error, Debug, Clone)]
pub enum SystemError {
    /// The storage engine itself failed (locked file, I/O inside the engine).
    #[error("database engine error: {0}")]
    DatabaseEngine(String),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("invalid state: {0}")]
    InvalidState(String),

    #[error("operation timed out after {0:?}")]
    Timeout(Duration),
}

/// Convenience constructors
impl SystemError {
    pub fn database_engine(msg: impl Into<String>) -> Self {
        SystemError::DatabaseEngine(msg.into())
    }

    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        SystemError::InvalidArgument(msg.into())
    }

    pub fn invalid_state(msg: impl Into<String>) -> Self {
        SystemError::InvalidState(msg.into())
    }
}

/// Result type alias for values handed to presentation
pub type FailureResult<T> = Result<T, Failure>;

/// Extension trait converting any error result into a [`FailureResult`].
pub trait IntoFailure<T> {
    fn into_failure(self) -> FailureResult<T>;
}

impl<T, E> IntoFailure<T> for Result<T, E>
where
    E: StdError + 'static,
{
    fn into_failure(self) -> FailureResult<T> {
        self.map_err(|e| handle_exception(&e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::{AppException, FailureKind, StorageCode};

    #[test]
    fn test_into_failure_converts_domain_errors() {
        let result: Result<(), AppException> =
            Err(AppException::storage(StorageCode::WriteFailed, "disk full"));
        let failure = result.into_failure().unwrap_err();
        assert_eq!(failure.kind(), FailureKind::Storage);
        assert_eq!(failure.code(), Some("STOR_002"));
    }

    #[test]
    fn test_into_failure_converts_system_errors() {
        let result: Result<u8, SystemError> = Err(SystemError::invalid_state("log already closed"));
        let failure = result.into_failure().unwrap_err();
        assert_eq!(failure.kind(), FailureKind::Data);
        assert_eq!(failure.code(), Some("DATA_STATE_ERROR"));
    }

    #[test]
    fn test_into_failure_keeps_ok() {
        let result: Result<u8, SystemError> = Ok(7);
        assert_eq!(result.into_failure(), Ok(7));
    }
}
