//! Field and form validators.
//!
//! A [`FormValidator`] is assembled once per form shape with
//! [`FormValidatorBuilder`] and reused for every submission of that form.
//! Validation is a pure function of the validator and the submitted data.

use std::fmt;
use std::sync::Arc;

use crate::codes::ValidationCode;
use crate::error::{AppException, DomainResult};
use crate::failure::Failure;
use crate::field_errors::FieldErrors;
use crate::validation::rule::{RequiredRule, SharedRule, ValidationRule};
use crate::validation::value::{FormData, FormValue};

/// Ordered rule chain for one field.
#[derive(Clone)]
pub struct FieldValidation {
    field_name: String,
    rules: Vec<SharedRule>,
    is_required: bool,
}

impl FieldValidation {
    /// A required field. A [`RequiredRule`] is prepended to `rules`.
    pub fn required(field_name: impl Into<String>, rules: impl IntoIterator<Item = SharedRule>) -> Self {
        let mut chain: Vec<SharedRule> = vec![RequiredRule::new().into_shared()];
        chain.extend(rules);
        Self {
            field_name: field_name.into(),
            rules: chain,
            is_required: true,
        }
    }

    pub fn optional(field_name: impl Into<String>, rules: impl IntoIterator<Item = SharedRule>) -> Self {
        Self {
            field_name: field_name.into(),
            rules: rules.into_iter().collect(),
            is_required: false,
        }
    }

    pub fn field_name(&self) -> &str {
        &self.field_name
    }

    pub fn rules(&self) -> &[SharedRule] {
        &self.rules
    }

    pub fn is_required(&self) -> bool {
        self.is_required
    }

    /// Run the chain in order and stop at the first error.
    pub fn validate(&self, value: &FormValue, form: &FormData) -> Option<String> {
        self.rules
            .iter()
            .find_map(|rule| rule.validate_in_form(value, form))
    }
}

impl fmt::Debug for FieldValidation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rules: Vec<String> = self.rules.iter().map(|rule| rule.description()).collect();
        f.debug_struct("FieldValidation")
            .field("field_name", &self.field_name)
            .field("rules", &rules)
            .field("is_required", &self.is_required)
            .finish()
    }
}

/// Rule evaluated against the whole form, for cross-field constraints.
pub trait FormRule: Send + Sync {
    fn validate(&self, form: &FormData) -> Option<String>;

    fn description(&self) -> String;

    fn error_key(&self) -> &str;
}

type FormPredicate = dyn Fn(&FormData) -> Option<String> + Send + Sync;

/// Closure-backed form rule.
#[derive(Clone)]
pub struct CustomFormRule {
    predicate: Arc<FormPredicate>,
    description: String,
    error_key: String,
}

impl CustomFormRule {
    pub fn new<F>(description: impl Into<String>, error_key: impl Into<String>, predicate: F) -> Self
    where
        F: Fn(&FormData) -> Option<String> + Send + Sync + 'static,
    {
        Self {
            predicate: Arc::new(predicate),
            description: description.into(),
            error_key: error_key.into(),
        }
    }
}

impl FormRule for CustomFormRule {
    fn validate(&self, form: &FormData) -> Option<String> {
        (self.predicate)(form)
    }

    fn description(&self) -> String {
        self.description.clone()
    }

    fn error_key(&self) -> &str {
        &self.error_key
    }
}

/// The end date must not precede the start date.
///
/// Missing or unparseable dates are left to the field rules.
#[derive(Debug, Clone)]
pub struct DateOrderRule {
    start_field: String,
    end_field: String,
    message: String,
}

impl DateOrderRule {
    pub fn new(start_field: impl Into<String>, end_field: impl Into<String>) -> Self {
        Self {
            start_field: start_field.into(),
            end_field: end_field.into(),
            message: "End date cannot be before start date".to_string(),
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }
}

impl FormRule for DateOrderRule {
    fn validate(&self, form: &FormData) -> Option<String> {
        let start = form.get(&self.start_field)?.as_date_time()?;
        let end = form.get(&self.end_field)?.as_date_time()?;
        (end < start).then(|| self.message.clone())
    }

    fn description(&self) -> String {
        format!("{} on or after {}", self.end_field, self.start_field)
    }

    fn error_key(&self) -> &str {
        "validation.date_order"
    }
}

/// Two fields must hold the same value.
#[derive(Debug, Clone)]
pub struct FieldsMatchRule {
    field: String,
    confirm_field: String,
    message: String,
}

impl FieldsMatchRule {
    pub fn new(field: impl Into<String>, confirm_field: impl Into<String>) -> Self {
        let field = field.into();
        let confirm_field = confirm_field.into();
        let message = format!("{} does not match {}", confirm_field, field);
        Self {
            field,
            confirm_field,
            message,
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }
}

impl FormRule for FieldsMatchRule {
    fn validate(&self, form: &FormData) -> Option<String> {
        let value = form.get(&self.field).unwrap_or(&FormValue::Null);
        let confirm = form.get(&self.confirm_field).unwrap_or(&FormValue::Null);
        (value != confirm).then(|| self.message.clone())
    }

    fn description(&self) -> String {
        format!("{} matches {}", self.confirm_field, self.field)
    }

    fn error_key(&self) -> &str {
        "validation.fields_match"
    }
}

/// Outcome of one form validation pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormValidationResult {
    is_valid: bool,
    field_errors: FieldErrors,
    general_errors: Vec<String>,
}

impl FormValidationResult {
    pub fn new(field_errors: FieldErrors, general_errors: Vec<String>) -> Self {
        Self {
            is_valid: field_errors.is_empty() && general_errors.is_empty(),
            field_errors,
            general_errors,
        }
    }

    pub fn valid() -> Self {
        Self::new(FieldErrors::new(), Vec::new())
    }

    pub fn is_valid(&self) -> bool {
        self.is_valid
    }

    pub fn field_errors(&self) -> &FieldErrors {
        &self.field_errors
    }

    /// Errors from form-level rules, in registration order.
    pub fn general_errors(&self) -> &[String] {
        &self.general_errors
    }

    pub fn error_for(&self, field: &str) -> Option<&str> {
        self.field_errors.get(field)
    }

    /// Field errors followed by general errors.
    pub fn all_errors(&self) -> Vec<String> {
        self.field_errors
            .messages()
            .map(str::to_string)
            .chain(self.general_errors.iter().cloned())
            .collect()
    }

    pub fn first_error(&self) -> Option<&str> {
        self.field_errors
            .messages()
            .next()
            .or_else(|| self.general_errors.first().map(String::as_str))
    }

    fn summary(&self) -> String {
        self.first_error()
            .map(|first| match self.field_errors.len() + self.general_errors.len() {
                1 => first.to_string(),
                n => format!("{} (and {} more)", first, n - 1),
            })
            .unwrap_or_else(|| "Form is valid".to_string())
    }

    /// Validation failure for presentation, or `None` when valid.
    pub fn to_failure(&self) -> Option<Failure> {
        if self.is_valid {
            return None;
        }
        Some(
            Failure::validation(self.summary(), self.field_errors.clone())
                .with_code(ValidationCode::FormInvalid.as_str()),
        )
    }

    /// Validation exception carrying the field errors, or `None` when valid.
    pub fn to_exception(&self) -> Option<AppException> {
        if self.is_valid {
            return None;
        }
        Some(AppException::validation(
            ValidationCode::FormInvalid,
            self.summary(),
            self.field_errors.clone(),
        ))
    }
}

/// Immutable validator for one form shape.
#[derive(Clone, Default)]
pub struct FormValidator {
    fields: Vec<FieldValidation>,
    form_rules: Vec<Arc<dyn FormRule>>,
}

impl FormValidator {
    pub fn new(fields: Vec<FieldValidation>, form_rules: Vec<Arc<dyn FormRule>>) -> Self {
        Self { fields, form_rules }
    }

    pub fn builder() -> FormValidatorBuilder {
        FormValidatorBuilder::default()
    }

    pub fn fields(&self) -> &[FieldValidation] {
        &self.fields
    }

    pub fn form_rules(&self) -> &[Arc<dyn FormRule>] {
        &self.form_rules
    }

    pub fn field(&self, field_name: &str) -> Option<&FieldValidation> {
        self.fields.iter().find(|field| field.field_name == field_name)
    }

    /// Validate every registered field, then every form-level rule.
    ///
    /// Absent fields are treated as null. If a field is registered more than
    /// once, the first error recorded for it wins. Form-level rules never
    /// short-circuit each other.
    pub fn validate_form(&self, data: &FormData) -> FormValidationResult {
        let mut field_errors = FieldErrors::new();
        for field in &self.fields {
            if field_errors.contains(&field.field_name) {
                continue;
            }
            let value = data.get(&field.field_name).unwrap_or(&FormValue::Null);
            if let Some(error) = field.validate(value, data) {
                field_errors.insert(field.field_name.clone(), error);
            }
        }

        let general_errors: Vec<String> = self
            .form_rules
            .iter()
            .filter_map(|rule| rule.validate(data))
            .collect();

        tracing::debug!(
            fields = self.fields.len(),
            field_errors = field_errors.len(),
            general_errors = general_errors.len(),
            "Form validated"
        );

        FormValidationResult::new(field_errors, general_errors)
    }

    /// Validate a single field for incremental feedback.
    ///
    /// Unknown fields are accepted. Without `form`, conditional rules see a
    /// form holding only this field.
    pub fn validate_field(&self, field_name: &str, value: &FormValue, form: Option<&FormData>) -> Option<String> {
        let field = self.field(field_name)?;
        match form {
            Some(form) => field.validate(value, form),
            None => {
                let only_field = FormData::from([(field_name.to_string(), value.clone())]);
                field.validate(value, &only_field)
            }
        }
    }

    /// # Errors
    /// Returns a `VAL_008` validation exception carrying the field errors
    /// when the form is invalid.
    pub fn validate_form_or_throw(&self, data: &FormData) -> DomainResult<()> {
        match self.validate_form(data).to_exception() {
            Some(exception) => Err(exception),
            None => Ok(()),
        }
    }
}

impl fmt::Debug for FormValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let form_rules: Vec<String> = self.form_rules.iter().map(|rule| rule.description()).collect();
        f.debug_struct("FormValidator")
            .field("fields", &self.fields)
            .field("form_rules", &form_rules)
            .finish()
    }
}

/// Fluent builder for [`FormValidator`]. Registration order is evaluation order.
#[derive(Default)]
pub struct FormValidatorBuilder {
    fields: Vec<FieldValidation>,
    form_rules: Vec<Arc<dyn FormRule>>,
}

impl FormValidatorBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_required_field(
        mut self,
        field_name: impl Into<String>,
        rules: impl IntoIterator<Item = SharedRule>,
    ) -> Self {
        self.fields.push(FieldValidation::required(field_name, rules));
        self
    }

    pub fn add_optional_field(
        mut self,
        field_name: impl Into<String>,
        rules: impl IntoIterator<Item = SharedRule>,
    ) -> Self {
        self.fields.push(FieldValidation::optional(field_name, rules));
        self
    }

    pub fn add_field(mut self, field: FieldValidation) -> Self {
        self.fields.push(field);
        self
    }

    pub fn add_form_rule(mut self, rule: impl FormRule + 'static) -> Self {
        self.form_rules.push(Arc::new(rule));
        self
    }

    pub fn build(self) -> FormValidator {
        FormValidator::new(self.fields, self.form_rules)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::rule::{ConditionalRule, LengthRule};
    use crate::validation::value::form_data;

    fn name_form() -> FormValidator {
        FormValidator::builder()
            .add_required_field("name", [LengthRule::between(2, 50).into_shared()])
            .build()
    }

    #[test]
    fn test_required_rule_is_prepended() {
        let field = FieldValidation::required("name", [LengthRule::min(2).into_shared()]);
        assert!(field.is_required());
        assert_eq!(field.rules().len(), 2);
        assert_eq!(field.rules()[0].error_key(), "validation.required");
    }

    #[test]
    fn test_missing_required_field() {
        let result = name_form().validate_form(&FormData::new());
        assert!(!result.is_valid());
        assert_eq!(result.error_for("name"), Some(RequiredRule::DEFAULT_MESSAGE));
    }

    #[test]
    fn test_chain_short_circuits_on_first_error() {
        let result = name_form().validate_form(&form_data([("name", "A")]));
        assert_eq!(result.error_for("name"), Some("Must be at least 2 characters"));

        let result = name_form().validate_form(&form_data([("name", "Ann")]));
        assert!(result.is_valid());
        assert!(result.first_error().is_none());
    }

    #[test]
    fn test_form_rules_collect_every_error() {
        let validator = FormValidator::builder()
            .add_form_rule(CustomFormRule::new("first", "k1", |_| Some("first".to_string())))
            .add_form_rule(CustomFormRule::new("second", "k2", |_| Some("second".to_string())))
            .build();
        let result = validator.validate_form(&FormData::new());
        assert_eq!(result.general_errors(), ["first".to_string(), "second".to_string()]);
        assert!(result.field_errors().is_empty());
        assert!(!result.is_valid());
    }

    #[test]
    fn test_date_order_rule() {
        let rule = DateOrderRule::new("start", "end");
        assert!(rule
            .validate(&form_data([("start", "2024-01-01"), ("end", "2024-02-01")]))
            .is_none());
        assert_eq!(
            rule.validate(&form_data([("start", "2024-02-01"), ("end", "2024-01-01")]))
                .as_deref(),
            Some("End date cannot be before start date")
        );
        assert!(rule.validate(&form_data([("start", "2024-02-01")])).is_none());
        assert!(rule
            .validate(&form_data([("start", "2024-02-01"), ("end", "2024-02-01")]))
            .is_none());
    }

    #[test]
    fn test_fields_match_rule() {
        let rule = FieldsMatchRule::new("email", "confirm_email");
        assert!(rule
            .validate(&form_data([("email", "a@b.co"), ("confirm_email", "a@b.co")]))
            .is_none());
        assert_eq!(
            rule.validate(&form_data([("email", "a@b.co"), ("confirm_email", "x@b.co")]))
                .as_deref(),
            Some("confirm_email does not match email")
        );
    }

    #[test]
    fn test_validate_field_unknown_field_passes() {
        assert!(name_form()
            .validate_field("nickname", &FormValue::Null, None)
            .is_none());
        assert!(name_form()
            .validate_field("name", &FormValue::from("A"), None)
            .is_some());
    }

    #[test]
    fn test_validate_field_sees_form_for_conditional_rules() {
        let validator = FormValidator::builder()
            .add_optional_field(
                "company",
                [ConditionalRule::when_equals(
                    "employed",
                    true,
                    RequiredRule::with_message("Company is required").into_shared(),
                )
                .into_shared()],
            )
            .build();
        let employed = form_data([("employed", FormValue::Bool(true))]);

        assert_eq!(
            validator
                .validate_field("company", &FormValue::Null, Some(&employed))
                .as_deref(),
            Some("Company is required")
        );
        assert!(validator
            .validate_field("company", &FormValue::Null, None)
            .is_none());
    }

    #[test]
    fn test_validate_form_or_throw() {
        let err = name_form().validate_form_or_throw(&FormData::new()).unwrap_err();
        assert_eq!(err.code(), "VAL_008");
        assert_eq!(
            err.field_errors().and_then(|f| f.get("name")),
            Some(RequiredRule::DEFAULT_MESSAGE)
        );
        assert!(name_form()
            .validate_form_or_throw(&form_data([("name", "Ann")]))
            .is_ok());
    }

    #[test]
    fn test_to_failure() {
        let result = name_form().validate_form(&FormData::new());
        let failure = result.to_failure().unwrap();
        assert_eq!(failure.code(), Some("VAL_008"));
        assert_eq!(failure.field_errors(), Some(result.field_errors()));
        assert!(FormValidationResult::valid().to_failure().is_none());
    }

    #[test]
    fn test_first_registered_error_wins_for_duplicate_fields() {
        let validator = FormValidator::builder()
            .add_required_field("name", Vec::<SharedRule>::new())
            .add_optional_field("name", [LengthRule::min(5).into_shared()])
            .build();
        let result = validator.validate_form(&FormData::new());
        assert_eq!(result.error_for("name"), Some(RequiredRule::DEFAULT_MESSAGE));
    }
}
