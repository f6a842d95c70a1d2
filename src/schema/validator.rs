//! Schema-driven form validation
//!
//! Validation semantics:
//! - Fields are checked in schema order
//! - A required field that is absent or empty yields its message and
//!   nothing else is checked for it
//! - A present value is checked against the constraints of its kind
//! - Each field yields at most one message
//! - Submitted keys the schema does not declare are ignored
//!
//! Validation is pure: it reads nothing but its arguments.

use chrono::NaiveDate;

use super::types::{FieldKind, FieldSchema, FormSchema, DATE_FORMAT};
use super::value::{FieldValue, FormValues};

/// Validator bound to one form schema.
pub struct SchemaValidator<'a> {
    schema: &'a FormSchema,
}

impl<'a> SchemaValidator<'a> {
    pub fn new(schema: &'a FormSchema) -> Self {
        Self { schema }
    }

    /// Validates submitted values, returning error messages in field order.
    ///
    /// An empty result means the values may be persisted.
    pub fn validate(&self, values: &FormValues) -> Vec<String> {
        self.schema
            .fields()
            .iter()
            .enumerate()
            .filter(|(index, field)| self.violates(*index, field, values.get(&field.key)))
            .map(|(_, field)| field.message.clone())
            .collect()
    }

    /// Returns true when `value` breaks any rule of `field`.
    fn violates(&self, index: usize, field: &FieldSchema, value: Option<&FieldValue>) -> bool {
        let value = match value {
            Some(v) if !v.is_empty() => v,
            _ => return field.required,
        };

        match &field.kind {
            FieldKind::ShortText {
                min_length,
                max_length,
                ..
            } => match value.as_text() {
                Some(text) => {
                    !within_length(text, *min_length, *max_length)
                        || self
                            .schema
                            .pattern(index)
                            .is_some_and(|re| !re.is_match(text))
                }
                None => true,
            },
            FieldKind::LongText {
                min_length,
                max_length,
            } => match value.as_text() {
                Some(text) => !within_length(text, *min_length, *max_length),
                None => true,
            },
            FieldKind::SingleChoice { options } => match value.as_text() {
                Some(choice) => !options.iter().any(|o| o == choice),
                None => true,
            },
            FieldKind::MultiChoice {
                options,
                min_selections,
                max_selections,
            } => match value.as_list() {
                Some(selected) => {
                    (field.required && selected.len() < *min_selections)
                        || max_selections.is_some_and(|max| selected.len() > max)
                        || selected.iter().any(|s| !options.contains(s))
                }
                None => true,
            },
            FieldKind::BoundedNumber { min, max, .. } => match value.as_number() {
                Some(n) => n < *min || n > *max,
                None => true,
            },
            FieldKind::Date => match value.as_text() {
                Some(text) => NaiveDate::parse_from_str(text, DATE_FORMAT).is_err(),
                None => true,
            },
        }
    }
}

/// Validates `values` against `schema`; see [`SchemaValidator::validate`].
pub fn validate(values: &FormValues, schema: &FormSchema) -> Vec<String> {
    SchemaValidator::new(schema).validate(values)
}

/// Character count within `[min, max]`; no max means unbounded.
fn within_length(text: &str, min: usize, max: Option<usize>) -> bool {
    let len = text.chars().count();
    len >= min && max.map_or(true, |max| len <= max)
}
