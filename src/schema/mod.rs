//! Form schema and validation
//!
//! A form schema is an ordered list of field entries. Each entry names a
//! field kind that carries its own constraints, so validation is an
//! exhaustive match over a closed set of kinds.
//!
//! # Design Principles
//!
//! - Defined once at startup, immutable afterwards
//! - Field order is record column order
//! - Validation is pure and deterministic
//! - One message per violating field, in field order

mod errors;
mod loader;
mod types;
mod validator;
mod value;
pub mod vendor;

pub use errors::{SchemaError, SchemaErrorCode, SchemaResult};
pub use loader::SchemaLoader;
pub use types::{FieldKind, FieldSchema, FormSchema, DATE_FORMAT};
pub use validator::{validate, SchemaValidator};
pub use value::{FieldValue, FormValues};
