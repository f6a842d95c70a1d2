//! Built-in vendor onboarding form

use super::types::{FieldKind, FieldSchema, FormSchema};

pub const BUSINESS_TYPES: [&str; 5] = [
    "Manufacturer",
    "Distributor",
    "Wholesaler",
    "Retailer",
    "Service Provider",
];

pub const PRODUCTS: [&str; 5] = ["Electronics", "Apparel", "Groceries", "Software", "Other"];

/// Header of the read-only vendor directory sheet
pub const VENDOR_FIELDS: [&str; 6] = [
    "Company Name",
    "Contact Person",
    "Email",
    "Phone",
    "Address",
    "Status",
];

fn owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Fields of the vendor onboarding form, in sheet column order.
pub fn vendor_fields() -> Vec<FieldSchema> {
    vec![
        FieldSchema::new(
            "company_name",
            "Company Name",
            FieldKind::ShortText {
                min_length: 2,
                max_length: Some(100),
                pattern: None,
            },
            true,
            "Company name must be between 2 and 100 characters.",
        ),
        FieldSchema::new(
            "business_type",
            "Business Type",
            FieldKind::SingleChoice {
                options: owned(&BUSINESS_TYPES),
            },
            true,
            "Please select a business type.",
        ),
        FieldSchema::new(
            "products",
            "Products Offered",
            FieldKind::MultiChoice {
                options: owned(&PRODUCTS),
                min_selections: 1,
                max_selections: None,
            },
            true,
            "Please select at least one product.",
        ),
        FieldSchema::new(
            "years_in_business",
            "Years in Business",
            FieldKind::BoundedNumber {
                min: 0,
                max: 50,
                default: 5,
            },
            true,
            "Years in business must be between 0 and 50.",
        ),
        FieldSchema::new(
            "onboarding_date",
            "Onboarding Date",
            FieldKind::Date,
            true,
            "Please select a valid onboarding date.",
        ),
        FieldSchema::new(
            "additional_info",
            "Additional Notes",
            FieldKind::LongText {
                min_length: 0,
                max_length: Some(500),
            },
            false,
            "Additional notes cannot exceed 500 characters.",
        ),
    ]
}

/// The vendor onboarding form schema.
pub fn vendor_form_schema() -> FormSchema {
    // The built-in field list is covered by tests; a failure here is a
    // programming error, not an input error.
    FormSchema::new(vendor_fields()).expect("built-in vendor schema is well formed")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vendor_schema_builds() {
        let schema = FormSchema::new(vendor_fields()).unwrap();
        assert_eq!(schema.len(), 6);
        assert_eq!(schema.position_of("products"), Some(2));
    }

    #[test]
    fn test_labels_form_the_sheet_header() {
        let schema = vendor_form_schema();
        assert_eq!(
            schema.labels(),
            vec![
                "Company Name",
                "Business Type",
                "Products Offered",
                "Years in Business",
                "Onboarding Date",
                "Additional Notes",
            ]
        );
    }
}
