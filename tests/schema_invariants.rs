//! Schema Invariant Tests
//!
//! - Required fields that are absent or empty yield their message
//! - Text length bounds are inclusive
//! - Required multi-choice fields enforce their minimum selection count
//! - Validation is pure and deterministic
//! - Schema files are checked before use

use std::io::Write;

use tempfile::NamedTempFile;
use vendor_portal::schema::vendor::vendor_form_schema;
use vendor_portal::schema::{
    validate, FieldKind, FieldSchema, FieldValue, FormSchema, FormValues, SchemaErrorCode,
    SchemaLoader,
};

// =============================================================================
// Helper Functions
// =============================================================================

fn values(pairs: &[(&str, FieldValue)]) -> FormValues {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.clone()))
        .collect()
}

fn text_schema(min: usize, max: usize) -> FormSchema {
    FormSchema::new(vec![FieldSchema::new(
        "name",
        "Name",
        FieldKind::ShortText {
            min_length: min,
            max_length: Some(max),
            pattern: None,
        },
        true,
        "Name length is wrong.",
    )])
    .unwrap()
}

fn named(len: usize) -> FormValues {
    values(&[("name", "x".repeat(len).into())])
}

// =============================================================================
// Required Fields
// =============================================================================

#[test]
fn test_required_empty_yields_field_message() {
    let schema = vendor_form_schema();

    for field in schema.fields().iter().filter(|f| f.required) {
        let absent = validate(&FormValues::new(), &schema);
        assert!(absent.contains(&field.message), "{}", field.key);

        let empty = match &field.kind {
            FieldKind::MultiChoice { .. } => FieldValue::List(vec![]),
            _ => FieldValue::Text(String::new()),
        };
        let errors = validate(&values(&[(field.key.as_str(), empty)]), &schema);
        assert!(errors.contains(&field.message), "{}", field.key);
    }
}

#[test]
fn test_optional_empty_is_accepted() {
    let schema = vendor_form_schema();
    let errors = validate(&values(&[("additional_info", "".into())]), &schema);
    assert!(!errors.contains(&"Additional notes cannot exceed 500 characters.".to_string()));
}

#[test]
fn test_empty_name_and_products_scenario() {
    let schema = vendor_form_schema();
    let input = values(&[
        ("company_name", "".into()),
        ("business_type", "Retailer".into()),
        ("products", FieldValue::List(vec![])),
        ("years_in_business", FieldValue::Number(0)),
        ("onboarding_date", "2024-03-09".into()),
    ]);

    assert_eq!(
        validate(&input, &schema),
        vec![
            "Company name must be between 2 and 100 characters.".to_string(),
            "Please select at least one product.".to_string(),
        ]
    );
}

// =============================================================================
// Length Bounds
// =============================================================================

#[test]
fn test_lengths_inside_bounds_never_error() {
    let schema = text_schema(2, 10);
    for len in 2..=10 {
        assert!(validate(&named(len), &schema).is_empty(), "len {}", len);
    }
}

#[test]
fn test_lengths_just_outside_bounds_error() {
    let schema = text_schema(2, 10);
    assert_eq!(validate(&named(1), &schema), vec!["Name length is wrong."]);
    assert_eq!(validate(&named(11), &schema), vec!["Name length is wrong."]);
}

#[test]
fn test_length_counts_characters() {
    let schema = text_schema(2, 3);
    let input = values(&[("name", "éèê".into())]);
    assert!(validate(&input, &schema).is_empty());
}

// =============================================================================
// Multi-choice
// =============================================================================

#[test]
fn test_required_multi_choice_minimum() {
    let schema = vendor_form_schema();
    let message = "Please select at least one product.".to_string();

    let none = validate(&values(&[("products", FieldValue::List(vec![]))]), &schema);
    assert!(none.contains(&message));

    let one = validate(
        &values(&[("products", FieldValue::List(vec!["Groceries".into()]))]),
        &schema,
    );
    assert!(!one.contains(&message));
}

#[test]
fn test_unknown_selection_rejected() {
    let schema = vendor_form_schema();
    let errors = validate(
        &values(&[("products", FieldValue::List(vec!["Spaceships".into()]))]),
        &schema,
    );
    assert!(errors.contains(&"Please select at least one product.".to_string()));
}

// =============================================================================
// Purity
// =============================================================================

#[test]
fn test_validation_is_deterministic() {
    let schema = vendor_form_schema();
    let input = values(&[
        ("company_name", "A".into()),
        ("years_in_business", FieldValue::Number(70)),
    ]);
    let before = input.clone();

    let first = validate(&input, &schema);
    let second = validate(&input, &schema);

    assert_eq!(first, second);
    assert_eq!(input, before);
}

#[test]
fn test_errors_follow_schema_order() {
    let schema = vendor_form_schema();
    let errors = validate(&FormValues::new(), &schema);
    assert_eq!(
        errors,
        vec![
            "Company name must be between 2 and 100 characters.",
            "Please select a business type.",
            "Please select at least one product.",
            "Years in business must be between 0 and 50.",
            "Please select a valid onboarding date.",
        ]
    );
}

// =============================================================================
// Schema Loading
// =============================================================================

#[test]
fn test_schema_file_round_trip() {
    let fields = serde_json::to_string(vendor_form_schema().fields()).unwrap();
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(fields.as_bytes()).unwrap();

    let loaded = SchemaLoader::load(Some(file.path())).unwrap();
    assert_eq!(loaded.labels(), vendor_form_schema().labels());
    assert_eq!(loaded.fields(), vendor_form_schema().fields());
}

#[test]
fn test_duplicate_keys_rejected() {
    let err = SchemaLoader::from_json_str(
        r#"[
            {"key": "a", "label": "A", "type": "date", "message": "m"},
            {"key": "a", "label": "B", "type": "date", "message": "m"}
        ]"#,
    )
    .unwrap_err();
    assert_eq!(err.code(), SchemaErrorCode::DuplicateField);
}
