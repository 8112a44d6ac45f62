//! Validators for the tracker's forms.
//!
//! Build each validator once, when its screen is created, and reuse it for
//! every submission. The `*_as_of` variants pin "today" for date rules.

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::constants::{
    MAX_ANSWER_LENGTH, MAX_COMPANY_LENGTH, MAX_HOURS_PER_DAY, MAX_NAME_LENGTH, MAX_NOTE_LENGTH,
    MAX_TRAINING_YEAR, MIN_NAME_LENGTH, MOODS, PHONE_PATTERN, STATUSES, TRADES,
};
use crate::validation::{
    rules, ConditionalRule, DateOrderRule, DateRule, EmailRule, FormValidator, LengthRule, PatternRule,
    RangeRule, RequiredRule, ValidationRule,
};

static PHONE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(PHONE_PATTERN).expect("valid phone regex"));

/// Names accepted by [`by_name`].
pub const FORM_NAMES: &[&str] = &["onboarding", "profile", "daily-log", "question"];

/// First-run onboarding: who the apprentice is and when training runs.
pub fn onboarding_form() -> FormValidator {
    onboarding_form_as_of(None)
}

pub fn onboarding_form_as_of(today: Option<NaiveDate>) -> FormValidator {
    FormValidator::builder()
        .add_required_field(
            "name",
            [LengthRule::between(MIN_NAME_LENGTH, MAX_NAME_LENGTH).into_shared()],
        )
        .add_required_field("email", [EmailRule::new().into_shared()])
        .add_required_field(
            "apprenticeship_start",
            [DateRule::new().no_future().as_of(today).into_shared()],
        )
        .add_optional_field("apprenticeship_end", [DateRule::new().as_of(today).into_shared()])
        .add_required_field("trade", [rules::selection_rule(TRADES)])
        .add_form_rule(
            DateOrderRule::new("apprenticeship_start", "apprenticeship_end")
                .with_message("Apprenticeship end cannot be before its start"),
        )
        .build()
}

/// Profile screen. Company becomes mandatory once the apprentice is employed.
pub fn profile_form() -> FormValidator {
    FormValidator::builder()
        .add_required_field(
            "name",
            [LengthRule::between(MIN_NAME_LENGTH, MAX_NAME_LENGTH).into_shared()],
        )
        .add_required_field("email", [EmailRule::new().into_shared()])
        .add_optional_field(
            "company",
            [
                ConditionalRule::when_equals(
                    "employed",
                    true,
                    RequiredRule::with_message("Company is required when employed").into_shared(),
                )
                .into_shared(),
                LengthRule::max(MAX_COMPANY_LENGTH).into_shared(),
            ],
        )
        .add_optional_field(
            "phone",
            [PatternRule::from_regex(PHONE_REGEX.clone(), "a phone number like +44 7700 900123")
                .into_shared()],
        )
        .add_optional_field(
            "year_of_training",
            [RangeRule::between(1.0, MAX_TRAINING_YEAR).into_shared()],
        )
        .build()
}

/// Daily mood and status log.
pub fn daily_log_form() -> FormValidator {
    daily_log_form_as_of(None)
}

pub fn daily_log_form_as_of(today: Option<NaiveDate>) -> FormValidator {
    FormValidator::builder()
        .add_required_field("date", [DateRule::new().no_future().as_of(today).into_shared()])
        .add_required_field("mood", [rules::selection_rule(MOODS)])
        .add_required_field("status", [rules::selection_rule(STATUSES)])
        .add_optional_field("note", [LengthRule::max(MAX_NOTE_LENGTH).into_shared()])
        .add_optional_field(
            "hours_worked",
            [RangeRule::between(0.0, MAX_HOURS_PER_DAY).into_shared()],
        )
        .build()
}

/// Answer to the question of the day.
pub fn question_answer_form() -> FormValidator {
    FormValidator::builder()
        .add_required_field("answer", [LengthRule::between(1, MAX_ANSWER_LENGTH).into_shared()])
        .build()
}

/// Look up a form validator by its short name.
pub fn by_name(name: &str) -> Option<FormValidator> {
    by_name_as_of(name, None)
}

pub fn by_name_as_of(name: &str, today: Option<NaiveDate>) -> Option<FormValidator> {
    match name {
        "onboarding" => Some(onboarding_form_as_of(today)),
        "profile" => Some(profile_form()),
        "daily-log" => Some(daily_log_form_as_of(today)),
        "question" => Some(question_answer_form()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::{form_data, FormData, FormValue};

    #[test]
    fn test_every_form_name_resolves() {
        for name in FORM_NAMES {
            assert!(by_name(name).is_some(), "{name} should resolve");
        }
        assert!(by_name("payroll").is_none());
    }

    #[test]
    fn test_onboarding_valid() {
        let data = form_data([
            ("name", "Ann Lee"),
            ("email", "ann@example.com"),
            ("apprenticeship_start", "2023-08-01"),
            ("apprenticeship_end", "2026-07-31"),
            ("trade", "electrical"),
        ]);
        let result = onboarding_form().validate_form(&data);
        assert!(result.is_valid(), "{:?}", result.all_errors());
    }

    #[test]
    fn test_onboarding_reports_field_and_form_errors() {
        let data = form_data([
            ("name", "A"),
            ("email", "ann@example.com"),
            ("apprenticeship_start", "2023-08-01"),
            ("apprenticeship_end", "2022-07-31"),
            ("trade", "astronaut"),
        ]);
        let result = onboarding_form().validate_form(&data);
        assert_eq!(result.error_for("name"), Some("Must be at least 2 characters"));
        assert!(result.error_for("trade").unwrap().starts_with("Please select one of:"));
        assert_eq!(
            result.general_errors(),
            ["Apprenticeship end cannot be before its start".to_string()]
        );
    }

    #[test]
    fn test_profile_company_required_when_employed() {
        let employed = form_data([
            ("name", FormValue::from("Ann")),
            ("email", FormValue::from("ann@example.com")),
            ("employed", FormValue::Bool(true)),
        ]);
        let result = profile_form().validate_form(&employed);
        assert_eq!(result.error_for("company"), Some("Company is required when employed"));

        let mut unemployed = employed.clone();
        unemployed.insert("employed".to_string(), FormValue::Bool(false));
        assert!(profile_form().validate_form(&unemployed).is_valid());
    }

    #[test]
    fn test_profile_phone_and_year() {
        let data = form_data([
            ("name", FormValue::from("Ann")),
            ("email", FormValue::from("ann@example.com")),
            ("phone", FormValue::from("call me")),
            ("year_of_training", FormValue::Number(5.0)),
        ]);
        let result = profile_form().validate_form(&data);
        assert!(result.error_for("phone").is_some());
        assert_eq!(result.error_for("year_of_training"), Some("Must be at most 4"));
    }

    #[test]
    fn test_daily_log_rejects_unknown_mood() {
        let data = form_data([
            ("date", "2024-03-04"),
            ("mood", "ecstatic"),
            ("status", "workplace"),
        ]);
        let result = daily_log_form().validate_form(&data);
        assert_eq!(
            result.error_for("mood"),
            Some("Please select one of: great, good, okay, bad, terrible")
        );
        assert_eq!(result.field_errors().len(), 1);
    }

    #[test]
    fn test_daily_log_future_date_against_pinned_today() {
        let data = form_data([
            ("date", "2024-03-05"),
            ("mood", "good"),
            ("status", "school"),
        ]);
        let today = NaiveDate::from_ymd_opt(2024, 3, 4);
        let result = by_name_as_of("daily-log", today).unwrap().validate_form(&data);
        assert_eq!(result.error_for("date"), Some("Date cannot be in the future"));

        let tomorrow = NaiveDate::from_ymd_opt(2024, 3, 5);
        assert!(by_name_as_of("daily-log", tomorrow).unwrap().validate_form(&data).is_valid());
    }

    #[test]
    fn test_question_answer_required() {
        let result = question_answer_form().validate_form(&FormData::new());
        assert_eq!(result.error_for("answer"), Some(RequiredRule::DEFAULT_MESSAGE));
    }
}
