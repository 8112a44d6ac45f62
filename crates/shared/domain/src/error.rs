//! Domain-level exceptions.
//!
//! Lower layers (storage, parsing, business rules) raise [`AppException`]s.
//! Each carries a stable code from its kind's namespace and a category that is
//! derived from the kind, never set independently. Exceptions stay inside the
//! domain: the boundary handler turns them into [`crate::Failure`] values.

use std::backtrace::Backtrace;
use std::error::Error as StdError;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::codes::{
    AuthCode, ConfigurationCode, DataCode, DatabaseCode, NetworkCode, StorageCode, ValidationCode,
};
use crate::field_errors::FieldErrors;

/// Wrapped lower-level cause, shareable across clones of an exception.
pub type SharedError = Arc<dyn StdError + Send + Sync + 'static>;

/// Descriptive grouping attached to every domain exception.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExceptionCategory {
    Validation,
    Authentication,
    Storage,
    Data,
    Network,
    Configuration,
    /// Errors that never were domain exceptions.
    Unknown,
}

impl fmt::Display for ExceptionCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ExceptionCategory::Validation => "validation",
            ExceptionCategory::Authentication => "authentication",
            ExceptionCategory::Storage => "storage",
            ExceptionCategory::Data => "data",
            ExceptionCategory::Network => "network",
            ExceptionCategory::Configuration => "configuration",
            ExceptionCategory::Unknown => "unknown",
        };
        f.write_str(name)
    }
}

/// Exception variant together with its code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExceptionKind {
    Database(DatabaseCode),
    Auth(AuthCode),
    Validation {
        code: ValidationCode,
        field_errors: FieldErrors,
    },
    Data(DataCode),
    Storage(StorageCode),
    Network(NetworkCode),
    Configuration(ConfigurationCode),
}

impl ExceptionKind {
    pub fn code(&self) -> &'static str {
        match self {
            ExceptionKind::Database(code) => code.as_str(),
            ExceptionKind::Auth(code) => code.as_str(),
            ExceptionKind::Validation { code, .. } => code.as_str(),
            ExceptionKind::Data(code) => code.as_str(),
            ExceptionKind::Storage(code) => code.as_str(),
            ExceptionKind::Network(code) => code.as_str(),
            ExceptionKind::Configuration(code) => code.as_str(),
        }
    }

    pub fn category(&self) -> ExceptionCategory {
        match self {
            ExceptionKind::Database(_) | ExceptionKind::Storage(_) => ExceptionCategory::Storage,
            ExceptionKind::Auth(_) => ExceptionCategory::Authentication,
            ExceptionKind::Validation { .. } => ExceptionCategory::Validation,
            ExceptionKind::Data(_) => ExceptionCategory::Data,
            ExceptionKind::Network(_) => ExceptionCategory::Network,
            ExceptionKind::Configuration(_) => ExceptionCategory::Configuration,
        }
    }
}

/// Typed exception raised by domain and business logic.
#[derive(Error, Debug, Clone)]
#[error("{} ({})", .message, .kind.code())]
pub struct AppException {
    kind: ExceptionKind,
    message: String,
    #[source]
    original_error: Option<SharedError>,
    stack_trace: Option<Arc<Backtrace>>,
}

impl AppException {
    /// Create an exception of the given kind.
    pub fn new(kind: ExceptionKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            original_error: None,
            stack_trace: None,
        }
    }

    pub fn database(code: DatabaseCode, message: impl Into<String>) -> Self {
        Self::new(ExceptionKind::Database(code), message)
    }

    pub fn auth(code: AuthCode, message: impl Into<String>) -> Self {
        Self::new(ExceptionKind::Auth(code), message)
    }

    pub fn validation(
        code: ValidationCode,
        message: impl Into<String>,
        field_errors: FieldErrors,
    ) -> Self {
        Self::new(ExceptionKind::Validation { code, field_errors }, message)
    }

    pub fn data(code: DataCode, message: impl Into<String>) -> Self {
        Self::new(ExceptionKind::Data(code), message)
    }

    pub fn storage(code: StorageCode, message: impl Into<String>) -> Self {
        Self::new(ExceptionKind::Storage(code), message)
    }

    pub fn network(code: NetworkCode, message: impl Into<String>) -> Self {
        Self::new(ExceptionKind::Network(code), message)
    }

    pub fn configuration(code: ConfigurationCode, message: impl Into<String>) -> Self {
        Self::new(ExceptionKind::Configuration(code), message)
    }

    /// Attach the lower-level error that caused this exception.
    pub fn with_source<E>(self, source: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        self.with_shared_source(Arc::new(source))
    }

    pub fn with_shared_source(mut self, source: SharedError) -> Self {
        self.original_error = Some(source);
        self
    }

    /// Capture a backtrace at the call site. Honors `RUST_BACKTRACE`.
    pub fn with_backtrace(mut self) -> Self {
        self.stack_trace = Some(Arc::new(Backtrace::capture()));
        self
    }

    pub fn kind(&self) -> &ExceptionKind {
        &self.kind
    }

    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    pub fn category(&self) -> ExceptionCategory {
        self.kind.category()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn original_error(&self) -> Option<&SharedError> {
        self.original_error.as_ref()
    }

    pub fn stack_trace(&self) -> Option<&Backtrace> {
        self.stack_trace.as_deref()
    }

    /// Field errors, present only on validation exceptions.
    pub fn field_errors(&self) -> Option<&FieldErrors> {
        match &self.kind {
            ExceptionKind::Validation { field_errors, .. } => Some(field_errors),
            _ => None,
        }
    }
}

/// Result type alias for domain operations
pub type DomainResult<T> = Result<T, AppException>;
