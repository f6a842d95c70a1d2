//! # Store Errors

use thiserror::Error;

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors raised by the sheet backends and the record store
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    // Access errors
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    #[error("Store rejected the supplied credentials")]
    Unauthorized,

    #[error("Store quota exceeded")]
    QuotaExceeded,

    #[error("Store returned HTTP {status}: {message}")]
    Http { status: u16, message: String },

    // Data errors
    #[error("Malformed store response: {0}")]
    MalformedResponse(String),

    #[error("Row {0} does not exist")]
    RowOutOfRange(usize),

    #[error("I/O error: {0}")]
    IoError(String),

    // Non-atomic update: the old row is gone and the new one was not written
    #[error("Row at position {position} was removed but the replacement could not be inserted: {reason}")]
    PartialUpdate { position: usize, reason: String },
}

impl StoreError {
    /// Stable error code string
    pub fn code(&self) -> &'static str {
        match self {
            StoreError::Unavailable(_) => "PORTAL_STORE_UNAVAILABLE",
            StoreError::Unauthorized => "PORTAL_STORE_UNAUTHORIZED",
            StoreError::QuotaExceeded => "PORTAL_STORE_QUOTA_EXCEEDED",
            StoreError::Http { .. } => "PORTAL_STORE_HTTP",
            StoreError::MalformedResponse(_) => "PORTAL_STORE_MALFORMED_RESPONSE",
            StoreError::RowOutOfRange(_) => "PORTAL_STORE_ROW_OUT_OF_RANGE",
            StoreError::IoError(_) => "PORTAL_STORE_IO",
            StoreError::PartialUpdate { .. } => "PORTAL_STORE_PARTIAL_UPDATE",
        }
    }

    /// The single message shown to the user for this failure
    pub fn user_message(&self) -> String {
        match self {
            StoreError::PartialUpdate { position, .. } => format!(
                "The vendor at row {} was removed but its updated details could not be saved. \
                 Please re-enter them with Onboard New Vendor.",
                position + 1
            ),
            StoreError::Unauthorized => {
                "The vendor sheet rejected our credentials. Please check your configuration.".into()
            }
            StoreError::QuotaExceeded => {
                "The vendor sheet is receiving too many requests. Please try again shortly.".into()
            }
            _ => "Unable to access vendor data. Please check your configuration.".into(),
        }
    }
}

impl From<std::io::Error> for StoreError {
    fn from(e: std::io::Error) -> Self {
        StoreError::IoError(e.to_string())
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(e: serde_json::Error) -> Self {
        StoreError::MalformedResponse(e.to_string())
    }
}
