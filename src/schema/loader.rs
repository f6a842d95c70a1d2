//! Schema loader for form schemas defined on disk
//!
//! A schema file is a JSON array of field entries in form order:
//!
//! ```json
//! [
//!   {"key": "company_name", "label": "Company Name", "type": "short_text",
//!    "min_length": 2, "max_length": 100, "required": true,
//!    "message": "Company name must be between 2 and 100 characters."}
//! ]
//! ```
//!
//! Without a schema file the built-in vendor form is used.

use std::fs;
use std::path::Path;

use tracing::debug;

use super::errors::{SchemaError, SchemaResult};
use super::types::{FieldSchema, FormSchema};
use super::vendor::vendor_form_schema;

pub struct SchemaLoader;

impl SchemaLoader {
    /// Loads the schema at `path`, or the built-in vendor schema when `None`.
    pub fn load(path: Option<&Path>) -> SchemaResult<FormSchema> {
        match path {
            Some(path) => Self::load_file(path),
            None => Ok(vendor_form_schema()),
        }
    }

    /// Loads and checks a single schema file.
    pub fn load_file(path: &Path) -> SchemaResult<FormSchema> {
        let content = fs::read_to_string(path).map_err(|e| {
            SchemaError::malformed_schema(
                path.display().to_string(),
                format!("Failed to read file: {}", e),
            )
        })?;

        let fields: Vec<FieldSchema> = serde_json::from_str(&content).map_err(|e| {
            SchemaError::malformed_schema(path.display().to_string(), format!("Invalid JSON: {}", e))
        })?;

        let schema = FormSchema::new(fields)?;

        debug!(path = %path.display(), fields = schema.len(), "loaded form schema");
        Ok(schema)
    }

    /// Parses a schema from its JSON text.
    pub fn from_json_str(json: &str) -> SchemaResult<FormSchema> {
        let fields: Vec<FieldSchema> = serde_json::from_str(json)
            .map_err(|e| SchemaError::malformed_schema("<inline>", format!("Invalid JSON: {}", e)))?;

        FormSchema::new(fields)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::SchemaErrorCode;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const CONTACT_SCHEMA: &str = r#"[
        {"key": "company_name", "label": "Company Name", "type": "short_text",
         "min_length": 2, "max_length": 100, "required": true,
         "message": "Company name must be between 2 and 100 characters."},
        {"key": "email", "label": "Email", "type": "short_text",
         "pattern": "^[^@\\s]+@[^@\\s]+$", "message": "Enter a valid email."},
        {"key": "status", "label": "Status", "type": "single_choice",
         "options": ["Active", "Inactive"], "required": true,
         "message": "Pick a status."}
    ]"#;

    #[test]
    fn test_load_builtin_when_no_path() {
        let schema = SchemaLoader::load(None).unwrap();
        assert_eq!(schema.fields()[0].key, "company_name");
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(CONTACT_SCHEMA.as_bytes()).unwrap();

        let schema = SchemaLoader::load(Some(file.path())).unwrap();
        assert_eq!(schema.len(), 3);
        assert!(schema.field("email").is_some_and(|f| !f.required));
    }

    #[test]
    fn test_invalid_json_is_malformed() {
        let err = SchemaLoader::from_json_str("{not json").unwrap_err();
        assert_eq!(err.code(), SchemaErrorCode::Malformed);
    }

    #[test]
    fn test_missing_file_is_malformed() {
        let err = SchemaLoader::load_file(Path::new("/nonexistent/schema.json")).unwrap_err();
        assert_eq!(err.code(), SchemaErrorCode::Malformed);
        assert!(err.message().contains("Failed to read file"));
    }

    #[test]
    fn test_duplicate_key_in_file() {
        let json = r#"[
            {"key": "a", "label": "A", "type": "date", "message": "m"},
            {"key": "a", "label": "A2", "type": "date", "message": "m"}
        ]"#;
        let err = SchemaLoader::from_json_str(json).unwrap_err();
        assert_eq!(err.code(), SchemaErrorCode::DuplicateField);
    }
}
