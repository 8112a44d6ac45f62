//! Atomic validation rules.
//!
//! A rule inspects one value and returns `None` when it is satisfied or a
//! human-readable message when it is not. Rules never panic on unexpected
//! value shapes; a number rule handed a list reports an error instead.

use std::fmt;
use std::sync::Arc;

use chrono::{Local, NaiveDate, NaiveDateTime};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::codes::ConfigurationCode;
use crate::error::{AppException, DomainResult};
use crate::validation::value::{format_number, FormData, FormValue};

/// Reference-counted rule, shareable between fields and validators.
pub type SharedRule = Arc<dyn ValidationRule>;

/// Contract implemented by every field rule.
pub trait ValidationRule: Send + Sync {
    /// Check a value in isolation.
    fn validate(&self, value: &FormValue) -> Option<String>;

    /// Check a value with the rest of the form available.
    ///
    /// Field evaluation always goes through this method. Rules that depend on
    /// sibling fields override it; the default ignores the form.
    fn validate_in_form(&self, value: &FormValue, _form: &FormData) -> Option<String> {
        self.validate(value)
    }

    fn description(&self) -> String;

    /// Key used to look up a localized message.
    fn error_key(&self) -> &str;

    fn into_shared(self) -> SharedRule
    where
        Self: Sized + 'static,
    {
        Arc::new(self)
    }
}

/// Fails on null, whitespace-only text, and empty lists.
#[derive(Debug, Clone)]
pub struct RequiredRule {
    message: String,
}

impl RequiredRule {
    pub const DEFAULT_MESSAGE: &'static str = "This field is required";

    pub fn new() -> Self {
        Self {
            message: Self::DEFAULT_MESSAGE.to_string(),
        }
    }

    pub fn with_message(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl Default for RequiredRule {
    fn default() -> Self {
        Self::new()
    }
}

impl ValidationRule for RequiredRule {
    fn validate(&self, value: &FormValue) -> Option<String> {
        value.is_blank().then(|| self.message.clone())
    }

    fn description(&self) -> String {
        "Required".to_string()
    }

    fn error_key(&self) -> &str {
        "validation.required"
    }
}

/// Bounds the textual length of a value. Null passes.
#[derive(Debug, Clone)]
pub struct LengthRule {
    min: Option<usize>,
    max: Option<usize>,
    message: Option<String>,
}

impl LengthRule {
    pub fn min(min: usize) -> Self {
        Self {
            min: Some(min),
            max: None,
            message: None,
        }
    }

    pub fn max(max: usize) -> Self {
        Self {
            min: None,
            max: Some(max),
            message: None,
        }
    }

    pub fn between(min: usize, max: usize) -> Self {
        Self {
            min: Some(min),
            max: Some(max),
            message: None,
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

impl ValidationRule for LengthRule {
    fn validate(&self, value: &FormValue) -> Option<String> {
        if value.is_null() {
            return None;
        }
        let length = value.length();
        let error = match (self.min, self.max) {
            (Some(min), _) if length < min => format!("Must be at least {} characters", min),
            (_, Some(max)) if length > max => format!("Must be no more than {} characters", max),
            _ => return None,
        };
        Some(self.message.clone().unwrap_or(error))
    }

    fn description(&self) -> String {
        match (self.min, self.max) {
            (Some(min), Some(max)) => format!("Length between {} and {}", min, max),
            (Some(min), None) => format!("Length at least {}", min),
            (None, Some(max)) => format!("Length at most {}", max),
            (None, None) => "Length".to_string(),
        }
    }

    fn error_key(&self) -> &str {
        "validation.length"
    }
}

static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").expect("valid email regex")
});

/// Checks `local@domain.tld` shape. Blank values pass.
#[derive(Debug, Clone)]
pub struct EmailRule {
    message: String,
}

impl EmailRule {
    pub const DEFAULT_MESSAGE: &'static str = "Please enter a valid email address";

    pub fn new() -> Self {
        Self {
            message: Self::DEFAULT_MESSAGE.to_string(),
        }
    }

    pub fn with_message(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl Default for EmailRule {
    fn default() -> Self {
        Self::new()
    }
}

impl ValidationRule for EmailRule {
    fn validate(&self, value: &FormValue) -> Option<String> {
        if value.is_blank() {
            return None;
        }
        let text = value.to_string();
        (!EMAIL_PATTERN.is_match(text.trim())).then(|| self.message.clone())
    }

    fn description(&self) -> String {
        "Valid email address".to_string()
    }

    fn error_key(&self) -> &str {
        "validation.email"
    }
}

/// Date constraints.
///
/// `allow_future` and `allow_past` compare calendar dates against today,
/// ignoring the time of day. `min_date` and `max_date` compare full
/// timestamps. Checks run in that order and the first violation is reported.
#[derive(Debug, Clone)]
pub struct DateRule {
    allow_future: bool,
    allow_past: bool,
    min_date: Option<NaiveDateTime>,
    max_date: Option<NaiveDateTime>,
    today: Option<NaiveDate>,
    message: Option<String>,
}

impl DateRule {
    pub fn new() -> Self {
        Self {
            allow_future: true,
            allow_past: true,
            min_date: None,
            max_date: None,
            today: None,
            message: None,
        }
    }

    pub fn no_future(mut self) -> Self {
        self.allow_future = false;
        self
    }

    pub fn no_past(mut self) -> Self {
        self.allow_past = false;
        self
    }

    pub fn min_date(mut self, min: impl Into<NaiveDateTime>) -> Self {
        self.min_date = Some(min.into());
        self
    }

    pub fn max_date(mut self, max: impl Into<NaiveDateTime>) -> Self {
        self.max_date = Some(max.into());
        self
    }

    /// Replace every date error with a single message.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Pin "today" for every check made through [`ValidationRule::validate`].
    pub fn as_of(mut self, today: Option<NaiveDate>) -> Self {
        self.today = today;
        self
    }

    /// Validate against an explicit "today" instead of the local clock.
    pub fn validate_on(&self, value: &FormValue, today: NaiveDate) -> Option<String> {
        if value.is_blank() {
            return None;
        }
        let error = match value.as_date_time() {
            None => "Please enter a valid date".to_string(),
            Some(date) => self.check(date, today)?,
        };
        Some(self.message.clone().unwrap_or(error))
    }

    fn check(&self, date: NaiveDateTime, today: NaiveDate) -> Option<String> {
        let day = date.date();
        if !self.allow_future && day > today {
            return Some("Date cannot be in the future".to_string());
        }
        if !self.allow_past && day < today {
            return Some("Date cannot be in the past".to_string());
        }
        if let Some(min) = self.min_date {
            if date < min {
                return Some(format!("Date must be on or after {}", min.format("%Y-%m-%d")));
            }
        }
        if let Some(max) = self.max_date {
            if date > max {
                return Some(format!("Date must be on or before {}", max.format("%Y-%m-%d")));
            }
        }
        None
    }
}

impl Default for DateRule {
    fn default() -> Self {
        Self::new()
    }
}

impl ValidationRule for DateRule {
    fn validate(&self, value: &FormValue) -> Option<String> {
        let today = self.today.unwrap_or_else(|| Local::now().date_naive());
        self.validate_on(value, today)
    }

    fn description(&self) -> String {
        let mut parts = vec!["Valid date".to_string()];
        if !self.allow_future {
            parts.push("not in the future".to_string());
        }
        if !self.allow_past {
            parts.push("not in the past".to_string());
        }
        if let Some(min) = self.min_date {
            parts.push(format!("from {}", min.format("%Y-%m-%d")));
        }
        if let Some(max) = self.max_date {
            parts.push(format!("until {}", max.format("%Y-%m-%d")));
        }
        parts.join(", ")
    }

    fn error_key(&self) -> &str {
        "validation.date"
    }
}

/// Numeric bounds. Null and blank text pass; unparseable text fails.
#[derive(Debug, Clone)]
pub struct RangeRule {
    min: Option<f64>,
    max: Option<f64>,
    inclusive: bool,
    message: Option<String>,
}

impl RangeRule {
    pub fn at_least(min: f64) -> Self {
        Self {
            min: Some(min),
            max: None,
            inclusive: true,
            message: None,
        }
    }

    pub fn at_most(max: f64) -> Self {
        Self {
            min: None,
            max: Some(max),
            inclusive: true,
            message: None,
        }
    }

    pub fn between(min: f64, max: f64) -> Self {
        Self {
            min: Some(min),
            max: Some(max),
            inclusive: true,
            message: None,
        }
    }

    /// Reject values equal to a bound.
    pub fn exclusive(mut self) -> Self {
        self.inclusive = false;
        self
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    fn check(&self, n: f64) -> Option<String> {
        if let Some(min) = self.min {
            if self.inclusive && n < min {
                return Some(format!("Must be at least {}", format_number(min)));
            }
            if !self.inclusive && n <= min {
                return Some(format!("Must be greater than {}", format_number(min)));
            }
        }
        if let Some(max) = self.max {
            if self.inclusive && n > max {
                return Some(format!("Must be at most {}", format_number(max)));
            }
            if !self.inclusive && n >= max {
                return Some(format!("Must be less than {}", format_number(max)));
            }
        }
        None
    }
}

impl ValidationRule for RangeRule {
    fn validate(&self, value: &FormValue) -> Option<String> {
        if value.is_null() || value.as_text().is_some_and(|t| t.trim().is_empty()) {
            return None;
        }
        let error = match value.as_number().filter(|n| n.is_finite()) {
            None => "Please enter a valid number".to_string(),
            Some(n) => self.check(n)?,
        };
        Some(self.message.clone().unwrap_or(error))
    }

    fn description(&self) -> String {
        let (low, high) = if self.inclusive { ("≥", "≤") } else { (">", "<") };
        match (self.min, self.max) {
            (Some(min), Some(max)) => format!(
                "Number {} {} and {} {}",
                low,
                format_number(min),
                high,
                format_number(max)
            ),
            (Some(min), None) => format!("Number {} {}", low, format_number(min)),
            (None, Some(max)) => format!("Number {} {}", high, format_number(max)),
            (None, None) => "Number".to_string(),
        }
    }

    fn error_key(&self) -> &str {
        "validation.range"
    }
}

/// Matches the value's text against a regular expression. Blank values pass.
#[derive(Debug, Clone)]
pub struct PatternRule {
    pattern: Regex,
    pattern_description: String,
    message: Option<String>,
}

impl PatternRule {
    /// # Errors
    /// Returns `CONF_002` if `pattern` is not a valid regular expression.
    pub fn new(pattern: &str, pattern_description: impl Into<String>) -> DomainResult<Self> {
        let regex = Regex::new(pattern).map_err(|e| {
            AppException::configuration(
                ConfigurationCode::Invalid,
                format!("Invalid validation pattern '{}'", pattern),
            )
            .with_source(e)
        })?;
        Ok(Self::from_regex(regex, pattern_description))
    }

    pub fn from_regex(pattern: Regex, pattern_description: impl Into<String>) -> Self {
        Self {
            pattern,
            pattern_description: pattern_description.into(),
            message: None,
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

impl ValidationRule for PatternRule {
    fn validate(&self, value: &FormValue) -> Option<String> {
        if value.is_blank() {
            return None;
        }
        if self.pattern.is_match(&value.to_string()) {
            return None;
        }
        Some(
            self.message
                .clone()
                .unwrap_or_else(|| format!("Invalid format: expected {}", self.pattern_description)),
        )
    }

    fn description(&self) -> String {
        self.pattern_description.clone()
    }

    fn error_key(&self) -> &str {
        "validation.pattern"
    }
}

type Predicate = dyn Fn(&FormValue) -> Option<String> + Send + Sync;

/// Arbitrary predicate for checks the built-in rules cannot express.
#[derive(Clone)]
pub struct CustomRule {
    predicate: Arc<Predicate>,
    description: String,
    error_key: String,
}

impl CustomRule {
    pub fn new<F>(description: impl Into<String>, error_key: impl Into<String>, predicate: F) -> Self
    where
        F: Fn(&FormValue) -> Option<String> + Send + Sync + 'static,
    {
        Self {
            predicate: Arc::new(predicate),
            description: description.into(),
            error_key: error_key.into(),
        }
    }
}

impl fmt::Debug for CustomRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CustomRule")
            .field("description", &self.description)
            .field("error_key", &self.error_key)
            .finish_non_exhaustive()
    }
}

impl ValidationRule for CustomRule {
    fn validate(&self, value: &FormValue) -> Option<String> {
        (self.predicate)(value)
    }

    fn description(&self) -> String {
        self.description.clone()
    }

    fn error_key(&self) -> &str {
        &self.error_key
    }
}

type Condition = dyn Fn(&FormData) -> bool + Send + Sync;

/// Applies the wrapped rule only when `condition` holds for the form.
///
/// Checked in isolation (no form available) the wrapped rule always applies.
#[derive(Clone)]
pub struct ConditionalRule {
    condition: Arc<Condition>,
    rule: SharedRule,
}

impl ConditionalRule {
    pub fn new<F>(condition: F, rule: SharedRule) -> Self
    where
        F: Fn(&FormData) -> bool + Send + Sync + 'static,
    {
        Self {
            condition: Arc::new(condition),
            rule,
        }
    }

    /// Apply `rule` when `field` holds exactly `expected`.
    pub fn when_equals(field: impl Into<String>, expected: impl Into<FormValue>, rule: SharedRule) -> Self {
        let field = field.into();
        let expected = expected.into();
        Self::new(move |form| form.get(&field) == Some(&expected), rule)
    }

    /// Apply `rule` when `field` is filled in.
    pub fn when_present(field: impl Into<String>, rule: SharedRule) -> Self {
        let field = field.into();
        Self::new(
            move |form| form.get(&field).is_some_and(|value| !value.is_blank()),
            rule,
        )
    }
}

impl fmt::Debug for ConditionalRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConditionalRule")
            .field("rule", &self.rule.description())
            .finish_non_exhaustive()
    }
}

impl ValidationRule for ConditionalRule {
    fn validate(&self, value: &FormValue) -> Option<String> {
        self.rule.validate(value)
    }

    fn validate_in_form(&self, value: &FormValue, form: &FormData) -> Option<String> {
        if (self.condition)(form) {
            self.rule.validate_in_form(value, form)
        } else {
            None
        }
    }

    fn description(&self) -> String {
        format!("{} (conditional)", self.rule.description())
    }

    fn error_key(&self) -> &str {
        self.rule.error_key()
    }
}
