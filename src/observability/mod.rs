//! Observability for the vendor portal
//!
//! Structured logging through `tracing`. Subscribers write to stderr so
//! stdout stays reserved for protocol responses.
//!
//! # Usage
//!
//! ```ignore
//! use vendor_portal::observability::{init_logging, LogFormat};
//!
//! init_logging("info", LogFormat::Json)?;
//! tracing::info!(rows = 3, "vendor sheet read");
//! ```

mod logger;

pub use logger::{init_logging, parse_level, LogFormat, LoggingError};
