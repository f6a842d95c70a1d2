//! Submitted field values

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Number, Value};
use std::collections::HashMap;

/// A value submitted for one field.
///
/// Shapes map onto field kinds: numbers for bounded numbers, lists for
/// multi-choice, text for everything else (dates travel as ISO strings).
/// Whole floats such as `5.0` read as numbers; other floats are kept as
/// their text so a bounded-number field rejects them with its message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Number(i64),
    Text(String),
    List(Vec<String>),
}

impl FieldValue {
    /// Empty text and empty selections count as "not provided".
    pub fn is_empty(&self) -> bool {
        match self {
            FieldValue::Number(_) => false,
            FieldValue::Text(s) => s.is_empty(),
            FieldValue::List(items) => items.is_empty(),
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            FieldValue::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<i64> {
        match self {
            FieldValue::Number(n) => Some(*n),
            _ => None,
        }
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Text(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::Text(s)
    }
}

impl From<i64> for FieldValue {
    fn from(n: i64) -> Self {
        FieldValue::Number(n)
    }
}

impl From<Vec<String>> for FieldValue {
    fn from(items: Vec<String>) -> Self {
        FieldValue::List(items)
    }
}

impl FieldValue {
    fn from_number(n: &Number) -> Self {
        if let Some(i) = n.as_i64() {
            return FieldValue::Number(i);
        }
        match n.as_f64() {
            Some(f) if f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64 => {
                FieldValue::Number(f as i64)
            }
            _ => FieldValue::Text(n.to_string()),
        }
    }
}

impl<'de> Deserialize<'de> for FieldValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match Value::deserialize(deserializer)? {
            Value::Number(n) => Ok(FieldValue::from_number(&n)),
            Value::String(s) => Ok(FieldValue::Text(s)),
            Value::Array(items) => items
                .into_iter()
                .map(|item| match item {
                    Value::String(s) => Ok(s),
                    other => Err(D::Error::custom(format!(
                        "list items must be strings, got {}",
                        other
                    ))),
                })
                .collect::<Result<Vec<_>, _>>()
                .map(FieldValue::List),
            other => Err(D::Error::custom(format!(
                "expected a number, string or list of strings, got {}",
                other
            ))),
        }
    }
}

/// Submitted values keyed by field key
pub type FormValues = HashMap<String, FieldValue>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_untagged_shapes() {
        let values: FormValues =
            serde_json::from_str(r#"{"a": "x", "b": 7, "c": ["p", "q"]}"#).unwrap();
        assert_eq!(values["a"], FieldValue::Text("x".into()));
        assert_eq!(values["b"], FieldValue::Number(7));
        assert_eq!(values["c"].as_list().map(<[String]>::len), Some(2));
    }

    #[test]
    fn test_float_values() {
        let values: FormValues =
            serde_json::from_str(r#"{"whole": 5.0, "half": 5.5, "big": 1e30}"#).unwrap();
        assert_eq!(values["whole"], FieldValue::Number(5));
        assert_eq!(values["half"], FieldValue::Text("5.5".into()));
        assert_eq!(values["big"].as_number(), None);
    }

    #[test]
    fn test_unsupported_shapes_rejected() {
        assert!(serde_json::from_str::<FieldValue>("true").is_err());
        assert!(serde_json::from_str::<FieldValue>(r#"{"a": 1}"#).is_err());
        assert!(serde_json::from_str::<FieldValue>(r#"["a", 1]"#).is_err());
        assert!(serde_json::from_str::<FieldValue>("null").is_err());
    }

    #[test]
    fn test_emptiness() {
        assert!(FieldValue::Text(String::new()).is_empty());
        assert!(FieldValue::List(Vec::new()).is_empty());
        assert!(!FieldValue::Number(0).is_empty());
        assert!(!FieldValue::Text(" ".into()).is_empty());
    }
}
