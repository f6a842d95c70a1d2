//! Presentation helpers
//!
//! Maps schema entries to widget descriptors, error lists to messages and
//! sheet snapshots to tables. Nothing here talks to the store.

use chrono::NaiveDate;
use serde::Serialize;

use crate::record::VendorRecord;
use crate::schema::{FieldKind, FieldSchema, FieldValue, FormSchema, FormValues, DATE_FORMAT};

/// Input widget for one form field
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Widget {
    pub key: String,
    pub label: String,
    pub widget: &'static str,
    pub required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_length: Option<usize>,
    pub value: FieldValue,
}

/// Widget name for a field kind
pub fn widget_name(kind: &FieldKind) -> &'static str {
    match kind {
        FieldKind::ShortText { .. } => "text_input",
        FieldKind::LongText { .. } => "text_area",
        FieldKind::SingleChoice { .. } => "select",
        FieldKind::MultiChoice { .. } => "multiselect",
        FieldKind::BoundedNumber { .. } => "slider",
        FieldKind::Date => "date_input",
    }
}

/// Value a widget starts with.
///
/// Stored values the widget could not display (an unknown option, a
/// number outside the slider, an unparsable date) fall back to the
/// kind's default.
pub fn prefill(kind: &FieldKind, current: Option<&FieldValue>, today: NaiveDate) -> FieldValue {
    let resolved = kind.resolve(current, today);

    let displayable = match (kind, &resolved) {
        (FieldKind::SingleChoice { options }, FieldValue::Text(choice)) => options.contains(choice),
        (FieldKind::MultiChoice { options, .. }, FieldValue::List(selected)) => {
            return FieldValue::List(
                selected
                    .iter()
                    .filter(|s| options.contains(s))
                    .cloned()
                    .collect(),
            );
        }
        (FieldKind::BoundedNumber { min, max, .. }, FieldValue::Number(n)) => n >= min && n <= max,
        (FieldKind::Date, FieldValue::Text(text)) => {
            NaiveDate::parse_from_str(text, DATE_FORMAT).is_ok()
        }
        (FieldKind::ShortText { .. } | FieldKind::LongText { .. }, FieldValue::Text(_)) => true,
        _ => false,
    };

    if displayable {
        resolved
    } else {
        kind.default_value(today)
    }
}

pub fn widget_for(field: &FieldSchema, current: Option<&FieldValue>, today: NaiveDate) -> Widget {
    let (options, min, max, max_length) = match &field.kind {
        FieldKind::ShortText { max_length, .. } | FieldKind::LongText { max_length, .. } => {
            (None, None, None, *max_length)
        }
        FieldKind::SingleChoice { options } | FieldKind::MultiChoice { options, .. } => {
            (Some(options.clone()), None, None, None)
        }
        FieldKind::BoundedNumber { min, max, .. } => (None, Some(*min), Some(*max), None),
        FieldKind::Date => (None, None, None, None),
    };

    Widget {
        key: field.key.clone(),
        label: field.label.clone(),
        widget: widget_name(&field.kind),
        required: field.required,
        options,
        min,
        max,
        max_length,
        value: prefill(&field.kind, current, today),
    }
}

/// Widgets for every field, pre-filled from `values`
pub fn render_form(schema: &FormSchema, values: &FormValues, today: NaiveDate) -> Vec<Widget> {
    schema
        .fields()
        .iter()
        .map(|field| widget_for(field, values.get(&field.key), today))
        .collect()
}

/// One message for a list of validation errors
pub fn format_errors(errors: &[String]) -> String {
    match errors {
        [] => String::new(),
        [only] => only.clone(),
        _ => {
            let mut message = String::from("Please correct the following:");
            for error in errors {
                message.push_str("\n- ");
                message.push_str(error);
            }
            message
        }
    }
}

/// Plain-text table with padded columns
pub fn render_table(header: &[String], records: &[VendorRecord]) -> String {
    if header.is_empty() && records.is_empty() {
        return "No vendors found.".to_string();
    }

    let columns = records
        .iter()
        .map(VendorRecord::len)
        .chain(std::iter::once(header.len()))
        .max()
        .unwrap_or(0);

    let mut widths = vec![0usize; columns];
    let rows = std::iter::once(header).chain(records.iter().map(VendorRecord::cells));
    for row in rows.clone() {
        for (i, cell) in row.iter().enumerate() {
            widths[i] = widths[i].max(cell.chars().count());
        }
    }

    let mut out = String::new();
    for (n, row) in rows.enumerate() {
        let line: Vec<String> = (0..columns)
            .map(|i| {
                let cell = row.get(i).map(String::as_str).unwrap_or("");
                format!("{:<width$}", cell, width = widths[i])
            })
            .collect();
        out.push_str(line.join(" | ").trim_end());
        out.push('\n');

        if n == 0 {
            let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
            out.push_str(&rule.join("-+-"));
            out.push('\n');
        }
    }

    if records.is_empty() {
        out.push_str("No vendors found.\n");
    }

    out
}
