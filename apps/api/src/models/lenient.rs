//! Tolerant field decoders for payloads produced by the external profile API.
//!
//! The API is loosely typed: arrays arrive as `null` or objects, strings as
//! numbers. Every decoder here maps an unexpected shape to the field's empty
//! value instead of failing the whole document.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Non-arrays decode to an empty list; elements that don't fit `T` are skipped.
pub fn seq<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(items) => items
            .into_iter()
            .filter_map(|item| serde_json::from_value(item).ok())
            .collect(),
        _ => Vec::new(),
    })
}

/// Strings pass through, numbers and booleans are stringified, anything else is `""`.
pub fn string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => String::new(),
    })
}

/// Numbers pass through, numeric strings are parsed, anything else is `0.0`.
pub fn number<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) => s.trim().parse().unwrap_or(0.0),
        _ => 0.0,
    })
}

/// Only JSON objects that decode into `T` become `Some`.
pub fn object<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    Ok(match Value::deserialize(deserializer)? {
        v @ Value::Object(_) => serde_json::from_value(v).ok(),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize)]
    struct Probe {
        #[serde(default, deserialize_with = "seq")]
        tags: Vec<String>,
        #[serde(default, deserialize_with = "string")]
        label: String,
        #[serde(default, deserialize_with = "number")]
        score: f64,
    }

    #[test]
    fn test_seq_skips_mismatched_elements() {
        let p: Probe = serde_json::from_str(r#"{"tags": ["a", 3, null, "b"]}"#).unwrap();
        assert_eq!(p.tags, vec!["a", "b"]);
    }

    #[test]
    fn test_seq_non_array_is_empty() {
        let p: Probe = serde_json::from_str(r#"{"tags": {"0": "a"}}"#).unwrap();
        assert!(p.tags.is_empty());
        let p: Probe = serde_json::from_str(r#"{"tags": null}"#).unwrap();
        assert!(p.tags.is_empty());
    }

    #[test]
    fn test_string_tolerates_numbers_and_null() {
        let p: Probe = serde_json::from_str(r#"{"label": 3.5}"#).unwrap();
        assert_eq!(p.label, "3.5");
        let p: Probe = serde_json::from_str(r#"{"label": null}"#).unwrap();
        assert_eq!(p.label, "");
    }

    #[test]
    fn test_number_parses_numeric_strings() {
        let p: Probe = serde_json::from_str(r#"{"score": " 12.5 "}"#).unwrap();
        assert!((p.score - 12.5).abs() < f64::EPSILON);
        let p: Probe = serde_json::from_str(r#"{"score": "n/a"}"#).unwrap();
        assert_eq!(p.score, 0.0);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let p: Probe = serde_json::from_str("{}").unwrap();
        assert!(p.tags.is_empty());
        assert_eq!(p.label, "");
    }
}
