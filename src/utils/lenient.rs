//! Serde adapters for untrusted extractor fields
//!
//! A single malformed field must not make a whole batch unreadable, so these
//! accept whatever shape arrives and leave the defaulting to the normalizer.

use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer};

use crate::ingest::text::parse_amount;

#[derive(Deserialize)]
#[serde(untagged)]
enum RawAmount {
    Number(f64),
    Text(String),
    Other(IgnoredAny),
}

/// Amount given as a number or a numeric string; anything else is `None`.
///
/// Strings are read as plain decimals first (`"121.00"`), then in the
/// invoice notation (`"1.210,50"`).
pub fn amount<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<RawAmount>::deserialize(deserializer)?;
    Ok(match raw {
        Some(RawAmount::Number(value)) if value.is_finite() => Some(value),
        Some(RawAmount::Text(text)) => parse_text_amount(&text),
        _ => None,
    })
}

fn parse_text_amount(text: &str) -> Option<f64> {
    let text = text.trim().trim_start_matches('$').trim();
    if !text.chars().any(|c| c.is_ascii_digit()) {
        return None;
    }
    if let Ok(value) = text.parse::<f64>() {
        return value.is_finite().then_some(value);
    }
    if text
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '.' | ',' | '-'))
    {
        return Some(parse_amount(text.trim_start_matches('-')) * sign(text));
    }
    None
}

fn sign(text: &str) -> f64 {
    if text.starts_with('-') {
        -1.0
    } else {
        1.0
    }
}

/// String that may be absent or `null`; both become empty
pub fn text_or_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Amounts {
        #[serde(default, deserialize_with = "super::amount")]
        value: Option<f64>,
        #[serde(default, deserialize_with = "super::text_or_empty")]
        label: String,
    }

    fn value(json: &str) -> Option<f64> {
        serde_json::from_str::<Amounts>(json).unwrap().value
    }

    #[test]
    fn test_numbers_and_numeric_strings() {
        assert_eq!(value(r#"{"value": 121.5}"#), Some(121.5));
        assert_eq!(value(r#"{"value": "121.00"}"#), Some(121.0));
        assert_eq!(value(r#"{"value": " $ 1.210,50 "}"#), Some(1210.5));
        assert_eq!(value(r#"{"value": "-3,25"}"#), Some(-3.25));
    }

    #[test]
    fn test_unusable_amounts_become_none() {
        assert_eq!(value(r#"{}"#), None);
        assert_eq!(value(r#"{"value": null}"#), None);
        assert_eq!(value(r#"{"value": "n/a"}"#), None);
        assert_eq!(value(r#"{"value": ""}"#), None);
        assert_eq!(value(r#"{"value": true}"#), None);
        assert_eq!(value(r#"{"value": [1, 2]}"#), None);
        assert_eq!(value(r#"{"value": {"amount": 5}}"#), None);
    }

    #[test]
    fn test_null_text_is_empty() {
        let parsed: Amounts = serde_json::from_str(r#"{"label": null}"#).unwrap();
        assert_eq!(parsed.label, "");
        let parsed: Amounts = serde_json::from_str(r#"{"label": "ticket"}"#).unwrap();
        assert_eq!(parsed.label, "ticket");
    }
}
