//! Field schema type definitions
//!
//! Supported field kinds:
//! - short_text: single-line text with length bounds and optional pattern
//! - long_text: multi-line text with length bounds
//! - single_choice: one value from a fixed option set
//! - multi_choice: any subset of a fixed option set, with count bounds
//! - bounded_number: integer within [min, max]
//! - date: ISO `YYYY-MM-DD`

use chrono::NaiveDate;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use super::errors::{SchemaError, SchemaResult};
use super::value::FieldValue;

/// Date format used for date fields on the wire and in the store.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Input kind of a form field, with the constraints that apply to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FieldKind {
    /// Single-line text
    ShortText {
        #[serde(default)]
        min_length: usize,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        max_length: Option<usize>,
        /// Regular expression a present value must match
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pattern: Option<String>,
    },
    /// Multi-line text
    LongText {
        #[serde(default)]
        min_length: usize,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        max_length: Option<usize>,
    },
    /// Exactly one of `options`
    SingleChoice { options: Vec<String> },
    /// Any subset of `options`
    MultiChoice {
        options: Vec<String>,
        #[serde(default)]
        min_selections: usize,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        max_selections: Option<usize>,
    },
    /// Integer within an inclusive range
    BoundedNumber { min: i64, max: i64, default: i64 },
    /// Calendar date
    Date,
}

impl FieldKind {
    /// Returns the kind name for error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            FieldKind::ShortText { .. } => "short_text",
            FieldKind::LongText { .. } => "long_text",
            FieldKind::SingleChoice { .. } => "single_choice",
            FieldKind::MultiChoice { .. } => "multi_choice",
            FieldKind::BoundedNumber { .. } => "bounded_number",
            FieldKind::Date => "date",
        }
    }

    /// Returns the value a blank form shows for this kind.
    ///
    /// `today` is passed in so resolution stays deterministic.
    pub fn default_value(&self, today: NaiveDate) -> FieldValue {
        match self {
            FieldKind::ShortText { .. } | FieldKind::LongText { .. } => {
                FieldValue::Text(String::new())
            }
            FieldKind::SingleChoice { options } => {
                FieldValue::Text(options.first().cloned().unwrap_or_default())
            }
            FieldKind::MultiChoice { .. } => FieldValue::List(Vec::new()),
            FieldKind::BoundedNumber { default, .. } => FieldValue::Number(*default),
            FieldKind::Date => FieldValue::Text(today.format(DATE_FORMAT).to_string()),
        }
    }

    /// Resolves a submitted value against the kind's default.
    ///
    /// Absent and empty values fall back to [`FieldKind::default_value`].
    pub fn resolve(&self, value: Option<&FieldValue>, today: NaiveDate) -> FieldValue {
        match value {
            Some(v) if !v.is_empty() => v.clone(),
            _ => self.default_value(today),
        }
    }
}

/// One form field: key, label, kind, required flag and error message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSchema {
    /// Key used in submitted values
    pub key: String,
    /// Label shown on the widget and used as the store header
    pub label: String,
    #[serde(flatten)]
    pub kind: FieldKind,
    #[serde(default)]
    pub required: bool,
    /// Message emitted for any violation of this field
    pub message: String,
}

impl FieldSchema {
    pub fn new(
        key: impl Into<String>,
        label: impl Into<String>,
        kind: FieldKind,
        required: bool,
        message: impl Into<String>,
    ) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            kind,
            required,
            message: message.into(),
        }
    }

    /// Validates the field definition itself (not a submitted value)
    pub fn validate_structure(&self) -> Result<(), String> {
        if self.key.trim().is_empty() {
            return Err("field key must not be empty".into());
        }

        match &self.kind {
            FieldKind::ShortText {
                min_length,
                max_length,
                pattern,
            } => {
                check_length_bounds(*min_length, *max_length)?;
                if let Some(p) = pattern {
                    Regex::new(p).map_err(|e| format!("invalid pattern: {}", e))?;
                }
            }
            FieldKind::LongText {
                min_length,
                max_length,
            } => check_length_bounds(*min_length, *max_length)?,
            FieldKind::SingleChoice { options } => check_options(options)?,
            FieldKind::MultiChoice {
                options,
                min_selections,
                max_selections,
            } => {
                check_options(options)?;
                if let Some(max) = max_selections {
                    if min_selections > max {
                        return Err(format!(
                            "min_selections {} exceeds max_selections {}",
                            min_selections, max
                        ));
                    }
                }
                if *min_selections > options.len() {
                    return Err(format!(
                        "min_selections {} exceeds the {} available options",
                        min_selections,
                        options.len()
                    ));
                }
            }
            FieldKind::BoundedNumber { min, max, default } => {
                if min > max {
                    return Err(format!("min {} exceeds max {}", min, max));
                }
                if default < min || default > max {
                    return Err(format!("default {} outside [{}, {}]", default, min, max));
                }
            }
            FieldKind::Date => {}
        }

        Ok(())
    }
}

fn check_length_bounds(min: usize, max: Option<usize>) -> Result<(), String> {
    match max {
        Some(max) if min > max => Err(format!("min_length {} exceeds max_length {}", min, max)),
        _ => Ok(()),
    }
}

fn check_options(options: &[String]) -> Result<(), String> {
    if options.is_empty() {
        return Err("options must not be empty".into());
    }
    let mut seen = HashSet::new();
    for option in options {
        if !seen.insert(option.as_str()) {
            return Err(format!("duplicate option '{}'", option));
        }
    }
    Ok(())
}

/// Ordered, immutable set of form fields.
///
/// Patterns are compiled once here so validation never recompiles them.
#[derive(Debug, Clone)]
pub struct FormSchema {
    fields: Vec<FieldSchema>,
    patterns: Vec<Option<Regex>>,
}

impl FormSchema {
    /// Builds a schema, rejecting malformed fields and duplicate keys.
    pub fn new(fields: Vec<FieldSchema>) -> SchemaResult<Self> {
        if fields.is_empty() {
            return Err(SchemaError::empty_schema());
        }

        let mut seen = HashSet::new();
        let mut patterns = Vec::with_capacity(fields.len());

        for field in &fields {
            if !seen.insert(field.key.as_str()) {
                return Err(SchemaError::duplicate_field(&field.key));
            }

            field
                .validate_structure()
                .map_err(|reason| SchemaError::invalid_constraint(&field.key, reason))?;

            let compiled = match &field.kind {
                FieldKind::ShortText {
                    pattern: Some(p), ..
                } => Some(
                    Regex::new(p)
                        .map_err(|e| SchemaError::invalid_constraint(&field.key, e.to_string()))?,
                ),
                _ => None,
            };
            patterns.push(compiled);
        }

        Ok(Self { fields, patterns })
    }

    /// Fields in form order
    pub fn fields(&self) -> &[FieldSchema] {
        &self.fields
    }

    pub fn field(&self, key: &str) -> Option<&FieldSchema> {
        self.fields.iter().find(|f| f.key == key)
    }

    /// Position of a field within the form (and within a record)
    pub fn position_of(&self, key: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.key == key)
    }

    /// Field labels in order, used as the store header row
    pub fn labels(&self) -> Vec<String> {
        self.fields.iter().map(|f| f.label.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub(crate) fn pattern(&self, index: usize) -> Option<&Regex> {
        self.patterns.get(index).and_then(Option::as_ref)
    }
}
