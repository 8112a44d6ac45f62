//! Failures returned to presentation code.
//!
//! A [`Failure`] is the only error-carrying value allowed to cross from the
//! domain into presentation. Failures are immutable and compared by value.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::field_errors::FieldErrors;

/// Attributes shared by every failure variant.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailureInfo {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    /// Rendered text of the error that caused this failure.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_error: Option<String>,
}

impl FailureInfo {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            code: None,
            original_error: None,
        }
    }
}

/// Fieldless discriminant of [`Failure`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    Auth,
    Database,
    Validation,
    Data,
    Storage,
    Network,
    Configuration,
}

impl FailureKind {
    pub const ALL: [FailureKind; 7] = [
        FailureKind::Auth,
        FailureKind::Database,
        FailureKind::Validation,
        FailureKind::Data,
        FailureKind::Storage,
        FailureKind::Network,
        FailureKind::Configuration,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FailureKind::Auth => "auth",
            FailureKind::Database => "database",
            FailureKind::Validation => "validation",
            FailureKind::Data => "data",
            FailureKind::Storage => "storage",
            FailureKind::Network => "network",
            FailureKind::Configuration => "configuration",
        }
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Typed error result handed to presentation code. Never thrown.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Failure {
    #[error("{}", .0.message)]
    Auth(FailureInfo),

    #[error("{}", .0.message)]
    Database(FailureInfo),

    #[error("{}", .info.message)]
    Validation {
        #[serde(flatten)]
        info: FailureInfo,
        #[serde(default)]
        field_errors: FieldErrors,
    },

    #[error("{}", .0.message)]
    Data(FailureInfo),

    #[error("{}", .0.message)]
    Storage(FailureInfo),

    #[error("{}", .0.message)]
    Network(FailureInfo),

    #[error("{}", .0.message)]
    Configuration(FailureInfo),
}

impl Failure {
    /// Build a failure of the given kind. Validation failures start without field errors.
    pub fn from_info(kind: FailureKind, info: FailureInfo) -> Self {
        match kind {
            FailureKind::Auth => Failure::Auth(info),
            FailureKind::Database => Failure::Database(info),
            FailureKind::Validation => Failure::Validation {
                info,
                field_errors: FieldErrors::new(),
            },
            FailureKind::Data => Failure::Data(info),
            FailureKind::Storage => Failure::Storage(info),
            FailureKind::Network => Failure::Network(info),
            FailureKind::Configuration => Failure::Configuration(info),
        }
    }

    pub fn auth(message: impl Into<String>) -> Self {
        Failure::Auth(FailureInfo::new(message))
    }

    pub fn database(message: impl Into<String>) -> Self {
        Failure::Database(FailureInfo::new(message))
    }

    pub fn validation(message: impl Into<String>, field_errors: FieldErrors) -> Self {
        Failure::Validation {
            info: FailureInfo::new(message),
            field_errors,
        }
    }

    pub fn data(message: impl Into<String>) -> Self {
        Failure::Data(FailureInfo::new(message))
    }

    pub fn storage(message: impl Into<String>) -> Self {
        Failure::Storage(FailureInfo::new(message))
    }

    pub fn network(message: impl Into<String>) -> Self {
        Failure::Network(FailureInfo::new(message))
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Failure::Configuration(FailureInfo::new(message))
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.info_mut().code = Some(code.into());
        self
    }

    pub fn with_original_error(mut self, original: impl fmt::Display) -> Self {
        self.info_mut().original_error = Some(original.to_string());
        self
    }

    pub fn kind(&self) -> FailureKind {
        match self {
            Failure::Auth(_) => FailureKind::Auth,
            Failure::Database(_) => FailureKind::Database,
            Failure::Validation { .. } => FailureKind::Validation,
            Failure::Data(_) => FailureKind::Data,
            Failure::Storage(_) => FailureKind::Storage,
            Failure::Network(_) => FailureKind::Network,
            Failure::Configuration(_) => FailureKind::Configuration,
        }
    }

    pub fn info(&self) -> &FailureInfo {
        match self {
            Failure::Auth(info)
            | Failure::Database(info)
            | Failure::Validation { info, .. }
            | Failure::Data(info)
            | Failure::Storage(info)
            | Failure::Network(info)
            | Failure::Configuration(info) => info,
        }
    }

    fn info_mut(&mut self) -> &mut FailureInfo {
        match self {
            Failure::Auth(info)
            | Failure::Database(info)
            | Failure::Validation { info, .. }
            | Failure::Data(info)
            | Failure::Storage(info)
            | Failure::Network(info)
            | Failure::Configuration(info) => info,
        }
    }

    pub fn message(&self) -> &str {
        &self.info().message
    }

    pub fn code(&self) -> Option<&str> {
        self.info().code.as_deref()
    }

    pub fn original_error(&self) -> Option<&str> {
        self.info().original_error.as_deref()
    }

    /// Field errors, present only on validation failures.
    pub fn field_errors(&self) -> Option<&FieldErrors> {
        match self {
            Failure::Validation { field_errors, .. } => Some(field_errors),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_equality() {
        let a = Failure::network("offline").with_code("NET_001");
        let b = Failure::network("offline").with_code("NET_001");
        let c = Failure::network("offline").with_code("NET_002");
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_ne!(a, Failure::storage("offline").with_code("NET_001"));
    }

    #[test]
    fn test_validation_equality_includes_field_errors() {
        let a = Failure::validation("invalid", [("email", "bad email")].into_iter().collect());
        let b = Failure::validation("invalid", FieldErrors::new());
        assert_ne!(a, b);
    }

    #[test]
    fn test_from_info_matches_kind() {
        for kind in FailureKind::ALL {
            let failure = Failure::from_info(kind, FailureInfo::new("boom"));
            assert_eq!(failure.kind(), kind);
            assert_eq!(failure.message(), "boom");
        }
    }

    #[test]
    fn test_serializes_with_kind_tag() {
        let failure = Failure::validation("invalid", [("name", "required")].into_iter().collect())
            .with_code("VAL_008");
        let json = serde_json::to_value(&failure).unwrap();
        assert_eq!(json["kind"], "validation");
        assert_eq!(json["code"], "VAL_008");
        assert_eq!(json["field_errors"]["name"], "required");

        let back: Failure = serde_json::from_value(json).unwrap();
        assert_eq!(back, failure);
    }
}
