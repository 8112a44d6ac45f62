//! Rule-based form validation.
//!
//! Atomic rules ([`rule`]) are chained per field ([`FieldValidation`]) and
//! combined with cross-field rules ([`FormRule`]) into an immutable
//! [`FormValidator`].

pub mod form;
pub mod rule;
pub mod rules;
pub mod value;

pub use form::{
    CustomFormRule, DateOrderRule, FieldValidation, FieldsMatchRule, FormRule,
    FormValidationResult, FormValidator, FormValidatorBuilder,
};
pub use rule::{
    ConditionalRule, CustomRule, DateRule, EmailRule, LengthRule, PatternRule, RangeRule,
    RequiredRule, SharedRule, ValidationRule,
};
pub use value::{form_data, form_data_from_json, FormData, FormValue};
