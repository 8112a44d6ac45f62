//! Domain layer - failure taxonomy and form validation.
//!
//! This crate contains pure domain logic with no infrastructure dependencies:
//! the exceptions raised by lower layers, the failures handed to
//! presentation, and the rule-based validator for the tracker's forms.

pub mod codes;
pub mod constants;
pub mod error;
pub mod failure;
pub mod field_errors;
pub mod forms;
pub mod validation;

pub use codes::{
    AuthCode, ConfigurationCode, DataCode, DatabaseCode, NetworkCode, StorageCode, UnknownCode,
    ValidationCode,
};
pub use constants::*;
pub use error::{AppException, DomainResult, ExceptionCategory, ExceptionKind, SharedError};
pub use failure::{Failure, FailureInfo, FailureKind};
pub use field_errors::FieldErrors;
pub use validation::{
    form_data, form_data_from_json, FormData, FormValidationResult, FormValidator,
    FormValidatorBuilder, FormValue, SharedRule, ValidationRule,
};
