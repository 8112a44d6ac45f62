//! Form values as submitted by the presentation layer.

use std::collections::HashMap;
use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use serde_json::Value;

use crate::codes::DataCode;
use crate::error::{AppException, DomainResult};

/// Raw form input keyed by field name.
pub type FormData = HashMap<String, FormValue>;

/// A single untyped form entry.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum FormValue {
    #[default]
    Null,
    Bool(bool),
    Number(f64),
    Text(String),
    Date(NaiveDateTime),
    List(Vec<FormValue>),
}

/// ISO-8601 timestamp with a `+hhmm` or `+hh:mm` offset.
const OFFSET_DATE_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f%z";

const DATE_TIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Extended and basic calendar dates.
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y%m%d"];

impl FormValue {
    pub fn is_null(&self) -> bool {
        matches!(self, FormValue::Null)
    }

    /// Null, whitespace-only text, or an empty list.
    pub fn is_blank(&self) -> bool {
        match self {
            FormValue::Null => true,
            FormValue::Text(text) => text.trim().is_empty(),
            FormValue::List(items) => items.is_empty(),
            _ => false,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            FormValue::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Numeric view; text is parsed after trimming.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            FormValue::Number(n) => Some(*n),
            FormValue::Text(text) => text.trim().parse::<f64>().ok(),
            _ => None,
        }
    }

    /// Date view; text is parsed as an ISO-8601 date or date-time.
    pub fn as_date_time(&self) -> Option<NaiveDateTime> {
        match self {
            FormValue::Date(date) => Some(*date),
            FormValue::Text(text) => parse_date_time(text.trim()),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[FormValue]> {
        match self {
            FormValue::List(items) => Some(items),
            _ => None,
        }
    }

    /// Length used by length rules: characters for text, items for lists.
    pub fn length(&self) -> usize {
        match self {
            FormValue::Null => 0,
            FormValue::Text(text) => text.chars().count(),
            FormValue::List(items) => items.len(),
            other => other.to_string().chars().count(),
        }
    }
}

fn parse_date_time(text: &str) -> Option<NaiveDateTime> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(text) {
        return Some(parsed.naive_local());
    }
    if let Ok(parsed) = DateTime::parse_from_str(text, OFFSET_DATE_TIME_FORMAT) {
        return Some(parsed.naive_local());
    }
    DATE_TIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|format| NaiveDate::parse_from_str(text, format).ok())
                .map(|date| date.and_time(NaiveTime::MIN))
        })
}

pub(crate) fn format_number(n: f64) -> String {
    if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        n.to_string()
    }
}

impl fmt::Display for FormValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormValue::Null => Ok(()),
            FormValue::Bool(b) => write!(f, "{}", b),
            FormValue::Number(n) => f.write_str(&format_number(*n)),
            FormValue::Text(text) => f.write_str(text),
            FormValue::Date(date) => write!(f, "{}", date.format("%Y-%m-%dT%H:%M:%S")),
            FormValue::List(items) => {
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                Ok(())
            }
        }
    }
}

impl From<&str> for FormValue {
    fn from(text: &str) -> Self {
        FormValue::Text(text.to_string())
    }
}

impl From<String> for FormValue {
    fn from(text: String) -> Self {
        FormValue::Text(text)
    }
}

impl From<bool> for FormValue {
    fn from(b: bool) -> Self {
        FormValue::Bool(b)
    }
}

impl From<f64> for FormValue {
    fn from(n: f64) -> Self {
        FormValue::Number(n)
    }
}

impl From<i32> for FormValue {
    fn from(n: i32) -> Self {
        FormValue::Number(f64::from(n))
    }
}

impl From<u32> for FormValue {
    fn from(n: u32) -> Self {
        FormValue::Number(f64::from(n))
    }
}

impl From<NaiveDate> for FormValue {
    fn from(date: NaiveDate) -> Self {
        FormValue::Date(date.and_time(NaiveTime::MIN))
    }
}

impl From<NaiveDateTime> for FormValue {
    fn from(date: NaiveDateTime) -> Self {
        FormValue::Date(date)
    }
}

impl<T: Into<FormValue>> From<Vec<T>> for FormValue {
    fn from(items: Vec<T>) -> Self {
        FormValue::List(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<FormValue>> From<Option<T>> for FormValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(FormValue::Null, Into::into)
    }
}

impl From<Value> for FormValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => FormValue::Null,
            Value::Bool(b) => FormValue::Bool(b),
            Value::Number(n) => n.as_f64().map_or(FormValue::Null, FormValue::Number),
            Value::String(text) => FormValue::Text(text),
            Value::Array(items) => FormValue::List(items.into_iter().map(FormValue::from).collect()),
            object @ Value::Object(_) => FormValue::Text(object.to_string()),
        }
    }
}

/// Build form data from `(field, value)` pairs.
pub fn form_data<I, K, V>(entries: I) -> FormData
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<FormValue>,
{
    entries
        .into_iter()
        .map(|(field, value)| (field.into(), value.into()))
        .collect()
}

/// Convert a JSON object document into form data.
///
/// # Errors
/// Returns `DATA_002` if the document is not a JSON object.
pub fn form_data_from_json(document: Value) -> DomainResult<FormData> {
    match document {
        Value::Object(fields) => Ok(fields
            .into_iter()
            .map(|(field, value)| (field, FormValue::from(value)))
            .collect()),
        other => Err(AppException::data(
            DataCode::ParseFailed,
            format!("Form data must be a JSON object, got {}", json_type_name(&other)),
        )),
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_blank_values() {
        assert!(FormValue::Null.is_blank());
        assert!(FormValue::from("   ").is_blank());
        assert!(FormValue::List(vec![]).is_blank());
        assert!(!FormValue::from("x").is_blank());
        assert!(!FormValue::Bool(false).is_blank());
        assert!(!FormValue::Number(0.0).is_blank());
    }

    #[test]
    fn test_date_parsing_accepts_iso_shapes() {
        let expected = NaiveDate::from_ymd_opt(2024, 9, 1)
            .unwrap()
            .and_hms_opt(8, 30, 0)
            .unwrap();
        assert_eq!(FormValue::from("2024-09-01T08:30:00").as_date_time(), Some(expected));
        assert_eq!(FormValue::from("2024-09-01T08:30:00Z").as_date_time(), Some(expected));
        assert_eq!(FormValue::from("2024-09-01T08:30").as_date_time(), Some(expected));
        assert_eq!(FormValue::from("2024-09-01 08:30").as_date_time(), Some(expected));
        assert_eq!(
            FormValue::from("2024-09-01T08:30:00.000+0100").as_date_time(),
            Some(expected)
        );
        assert_eq!(
            FormValue::from("2024-09-01T08:30:00+01:00").as_date_time(),
            Some(expected)
        );
        assert_eq!(
            FormValue::from("20240901").as_date_time(),
            NaiveDate::from_ymd_opt(2024, 9, 1).map(|d| d.and_time(NaiveTime::MIN))
        );
        assert_eq!(
            FormValue::from("2024-09-01").as_date_time(),
            NaiveDate::from_ymd_opt(2024, 9, 1).map(|d| d.and_time(NaiveTime::MIN))
        );
        assert_eq!(FormValue::from("first of september").as_date_time(), None);
    }

    #[test]
    fn test_number_view() {
        assert_eq!(FormValue::from(" 12.5 ").as_number(), Some(12.5));
        assert_eq!(FormValue::from("twelve").as_number(), None);
        assert_eq!(FormValue::Bool(true).as_number(), None);
    }

    #[test]
    fn test_display_renders_whole_numbers_without_fraction() {
        assert_eq!(FormValue::Number(3.0).to_string(), "3");
        assert_eq!(FormValue::Number(2.5).to_string(), "2.5");
        assert_eq!(FormValue::from(vec!["a", "b"]).to_string(), "a, b");
    }

    #[test]
    fn test_form_data_from_json() {
        let data = form_data_from_json(json!({
            "name": "Ann",
            "hours": 7,
            "tags": ["a"],
            "note": null,
        }))
        .unwrap();
        assert_eq!(data["name"], FormValue::from("Ann"));
        assert_eq!(data["hours"], FormValue::Number(7.0));
        assert_eq!(data["tags"], FormValue::from(vec!["a"]));
        assert_eq!(data["note"], FormValue::Null);
    }

    #[test]
    fn test_form_data_from_json_rejects_non_objects() {
        let err = form_data_from_json(json!([1, 2])).unwrap_err();
        assert_eq!(err.code(), "DATA_002");
    }
}
