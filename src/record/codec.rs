//! Conversion between submitted form values and sheet rows

use crate::schema::{FieldKind, FieldValue, FormSchema, FormValues};

use super::VendorRecord;

/// Separator used to store multi-choice selections in one cell
pub const LIST_SEPARATOR: &str = ", ";

/// Encodes and decodes records for one form schema.
pub struct RecordCodec<'a> {
    schema: &'a FormSchema,
}

impl<'a> RecordCodec<'a> {
    pub fn new(schema: &'a FormSchema) -> Self {
        Self { schema }
    }

    /// Builds the row for `values`, one cell per schema field in order.
    ///
    /// Absent values become empty cells. Values are written as given;
    /// callers validate first.
    pub fn encode(&self, values: &FormValues) -> VendorRecord {
        let cells = self
            .schema
            .fields()
            .iter()
            .map(|field| match values.get(&field.key) {
                Some(FieldValue::Text(s)) => s.clone(),
                Some(FieldValue::Number(n)) => n.to_string(),
                Some(FieldValue::List(items)) => items.join(LIST_SEPARATOR),
                None => String::new(),
            })
            .collect();

        VendorRecord::new(cells)
    }

    /// Reads a stored row back into form values.
    ///
    /// Empty cells and numbers that fail to parse are left absent so the
    /// form falls back to the field default. Text cells come back exactly
    /// as stored, surrounding whitespace included.
    pub fn decode(&self, record: &VendorRecord) -> FormValues {
        let mut values = FormValues::new();

        for (column, field) in self.schema.fields().iter().enumerate() {
            let cell = record.get(column).unwrap_or("");
            if cell.is_empty() {
                continue;
            }

            let value = match &field.kind {
                FieldKind::MultiChoice { .. } => {
                    let items: Vec<String> = cell
                        .split(',')
                        .map(str::trim)
                        .filter(|s| !s.is_empty())
                        .map(str::to_string)
                        .collect();
                    if items.is_empty() {
                        continue;
                    }
                    FieldValue::List(items)
                }
                FieldKind::BoundedNumber { .. } => match cell.trim().parse::<i64>() {
                    Ok(n) => FieldValue::Number(n),
                    Err(_) => continue,
                },
                _ => FieldValue::Text(cell.to_string()),
            };

            values.insert(field.key.clone(), value);
        }

        values
    }
}

/// Position of the first record whose `column` cell equals `name`.
pub fn first_position_named(records: &[VendorRecord], column: usize, name: &str) -> Option<usize> {
    records.iter().position(|r| r.get(column) == Some(name))
}
