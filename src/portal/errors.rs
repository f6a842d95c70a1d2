//! Portal error types
//!
//! Store errors pass through with their own code kept as detail; the
//! user sees one message per failure.

use thiserror::Error;

use crate::store::StoreError;

/// Portal error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PortalErrorCode {
    InvalidRequest,
    VendorNotFound,
    ValidationFailed,
    StoreError,
}

impl PortalErrorCode {
    pub fn code(&self) -> &'static str {
        match self {
            PortalErrorCode::InvalidRequest => "PORTAL_INVALID_REQUEST",
            PortalErrorCode::VendorNotFound => "PORTAL_VENDOR_NOT_FOUND",
            PortalErrorCode::ValidationFailed => "PORTAL_VALIDATION_FAILED",
            PortalErrorCode::StoreError => "PORTAL_STORE_ERROR",
        }
    }
}

#[derive(Debug, Clone, Error)]
pub enum PortalError {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Vendor not found: {0}")]
    VendorNotFound(String),

    /// User-correctable; carries every message in field order
    #[error("Validation failed with {} error(s)", .0.len())]
    Validation(Vec<String>),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl PortalError {
    pub fn code(&self) -> PortalErrorCode {
        match self {
            PortalError::InvalidRequest(_) => PortalErrorCode::InvalidRequest,
            PortalError::VendorNotFound(_) => PortalErrorCode::VendorNotFound,
            PortalError::Validation(_) => PortalErrorCode::ValidationFailed,
            PortalError::Store(_) => PortalErrorCode::StoreError,
        }
    }

    /// Message shown to the user
    pub fn user_message(&self) -> String {
        match self {
            PortalError::InvalidRequest(reason) => format!("Invalid request: {}", reason),
            PortalError::VendorNotFound(which) => {
                format!("Vendor {} was not found. Please refresh the vendor list.", which)
            }
            PortalError::Validation(errors) => super::render::format_errors(errors),
            PortalError::Store(e) => e.user_message(),
        }
    }

    /// Underlying store code, when the failure came from the store
    pub fn detail(&self) -> Option<&'static str> {
        match self {
            PortalError::Store(e) => Some(e.code()),
            _ => None,
        }
    }
}

/// Result type for portal operations
pub type PortalResult<T> = Result<T, PortalError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_errors_pass_through() {
        let err: PortalError = StoreError::QuotaExceeded.into();
        assert_eq!(err.code().code(), "PORTAL_STORE_ERROR");
        assert_eq!(err.detail(), Some("PORTAL_STORE_QUOTA_EXCEEDED"));
        assert!(err.user_message().contains("too many requests"));
    }

    #[test]
    fn test_validation_message_lists_errors() {
        let err = PortalError::Validation(vec!["a".into(), "b".into()]);
        assert_eq!(err.code(), PortalErrorCode::ValidationFailed);
        let message = err.user_message();
        assert!(message.contains("- a"));
        assert!(message.contains("- b"));
    }
}
