//! Ready-made rule chains.
//!
//! The bundled helpers start with a [`RequiredRule`]; use the `*_rule`
//! variants for optional fields.

use crate::validation::rule::{
    CustomRule, DateRule, EmailRule, LengthRule, RangeRule, RequiredRule, SharedRule,
    ValidationRule,
};
use crate::validation::value::FormValue;

pub fn required() -> Vec<SharedRule> {
    vec![RequiredRule::new().into_shared()]
}

pub fn email() -> Vec<SharedRule> {
    vec![RequiredRule::new().into_shared(), EmailRule::new().into_shared()]
}

pub fn date(rule: DateRule) -> Vec<SharedRule> {
    vec![RequiredRule::new().into_shared(), rule.into_shared()]
}

pub fn numeric_range(min: f64, max: f64) -> Vec<SharedRule> {
    vec![
        RequiredRule::new().into_shared(),
        RangeRule::between(min, max).into_shared(),
    ]
}

pub fn text(min: usize, max: usize) -> Vec<SharedRule> {
    vec![
        RequiredRule::new().into_shared(),
        LengthRule::between(min, max).into_shared(),
    ]
}

pub fn selection<S: AsRef<str>>(allowed: &[S]) -> Vec<SharedRule> {
    vec![RequiredRule::new().into_shared(), selection_rule(allowed)]
}

/// Membership in a fixed set of values. Blank values pass.
///
/// The error lists every allowed value. A list value passes only if all of
/// its items are allowed.
pub fn selection_rule<S: AsRef<str>>(allowed: &[S]) -> SharedRule {
    let allowed: Vec<String> = allowed.iter().map(|s| s.as_ref().to_string()).collect();
    let description = format!("One of: {}", allowed.join(", "));
    CustomRule::new(description, "validation.selection", move |value| {
        if value.is_blank() {
            return None;
        }
        let is_allowed = |item: &FormValue| allowed.iter().any(|a| *a == item.to_string());
        let ok = match value {
            FormValue::List(items) => items.iter().all(is_allowed),
            other => is_allowed(other),
        };
        (!ok).then(|| format!("Please select one of: {}", allowed.join(", ")))
    })
    .into_shared()
}
