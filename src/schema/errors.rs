//! Schema error types
//!
//! Error codes:
//! - PORTAL_SCHEMA_EMPTY
//! - PORTAL_SCHEMA_DUPLICATE_FIELD
//! - PORTAL_SCHEMA_INVALID_CONSTRAINT
//! - PORTAL_SCHEMA_MALFORMED
//!
//! Schema errors only occur while the schema is being built at startup;
//! validation of submitted values reports messages, not errors.

use std::fmt;

/// Schema-specific error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaErrorCode {
    /// Schema defines no fields
    Empty,
    /// Two fields share a key
    DuplicateField,
    /// A field's constraints are contradictory or unparsable
    InvalidConstraint,
    /// Schema file could not be read or parsed
    Malformed,
}

impl SchemaErrorCode {
    pub fn code(&self) -> &'static str {
        match self {
            SchemaErrorCode::Empty => "PORTAL_SCHEMA_EMPTY",
            SchemaErrorCode::DuplicateField => "PORTAL_SCHEMA_DUPLICATE_FIELD",
            SchemaErrorCode::InvalidConstraint => "PORTAL_SCHEMA_INVALID_CONSTRAINT",
            SchemaErrorCode::Malformed => "PORTAL_SCHEMA_MALFORMED",
        }
    }
}

impl fmt::Display for SchemaErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Schema error with the offending field, if any
#[derive(Debug)]
pub struct SchemaError {
    code: SchemaErrorCode,
    message: String,
    field: Option<String>,
}

impl SchemaError {
    pub fn empty_schema() -> Self {
        Self {
            code: SchemaErrorCode::Empty,
            message: "Schema must define at least one field".into(),
            field: None,
        }
    }

    pub fn duplicate_field(key: impl Into<String>) -> Self {
        let key = key.into();
        Self {
            code: SchemaErrorCode::DuplicateField,
            message: format!("Field '{}' is defined more than once", key),
            field: Some(key),
        }
    }

    pub fn invalid_constraint(key: impl Into<String>, reason: impl Into<String>) -> Self {
        let key = key.into();
        Self {
            code: SchemaErrorCode::InvalidConstraint,
            message: format!("Field '{}': {}", key, reason.into()),
            field: Some(key),
        }
    }

    /// Create an error for an unreadable or unparsable schema file
    pub fn malformed_schema(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            code: SchemaErrorCode::Malformed,
            message: format!("Malformed schema file '{}': {}", path.into(), reason.into()),
            field: None,
        }
    }

    pub fn code(&self) -> SchemaErrorCode {
        self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the offending field key if applicable
    pub fn field(&self) -> Option<&str> {
        self.field.as_deref()
    }
}

impl fmt::Display for SchemaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.code(), self.message)
    }
}

impl std::error::Error for SchemaError {}

/// Result type for schema operations
pub type SchemaResult<T> = Result<T, SchemaError>;
