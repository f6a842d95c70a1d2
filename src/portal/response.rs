//! Portal response types
//!
//! Three shapes, one JSON object per line:
//! - `{"status": "ok", "data": ...}`
//! - `{"status": "invalid", "message": ..., "errors": [...]}`
//! - `{"status": "error", "code": ..., "message": ..., "detail": ...}`

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::errors::PortalError;
use super::render::format_errors;

/// Success response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuccessResponse {
    pub status: String,
    pub data: Value,
}

impl SuccessResponse {
    pub fn new(data: Value) -> Self {
        Self {
            status: "ok".to_string(),
            data,
        }
    }
}

/// Validation failure: the submission was blocked
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvalidResponse {
    pub status: String,
    pub message: String,
    pub errors: Vec<String>,
}

impl InvalidResponse {
    pub fn new(errors: Vec<String>) -> Self {
        Self {
            status: "invalid".to_string(),
            message: format_errors(&errors),
            errors,
        }
    }
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub status: String,
    pub code: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl ErrorResponse {
    pub fn from_error(err: &PortalError) -> Self {
        Self {
            status: "error".to_string(),
            code: err.code().code().to_string(),
            message: err.user_message(),
            detail: err.detail().map(str::to_string),
        }
    }
}

/// Unified response type
#[derive(Debug, Clone)]
pub enum Response {
    Success(SuccessResponse),
    Invalid(InvalidResponse),
    Error(ErrorResponse),
}

impl Response {
    pub fn success(data: Value) -> Self {
        Response::Success(SuccessResponse::new(data))
    }

    /// Validation failures become `Invalid`; everything else is `Error`
    pub fn from_error(err: PortalError) -> Self {
        match err {
            PortalError::Validation(errors) => Response::Invalid(InvalidResponse::new(errors)),
            other => Response::Error(ErrorResponse::from_error(&other)),
        }
    }

    /// Convert to JSON string
    pub fn to_json(&self) -> String {
        let result = match self {
            Response::Success(r) => serde_json::to_string(r),
            Response::Invalid(r) => serde_json::to_string(r),
            Response::Error(r) => serde_json::to_string(r),
        };
        result.unwrap_or_else(|e| {
            format!(
                r#"{{"status":"error","code":"PORTAL_INTERNAL","message":"response encoding failed: {}"}}"#,
                e
            )
        })
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Response::Success(_))
    }

    /// Human-readable message carried by the response, if any
    pub fn message(&self) -> Option<&str> {
        match self {
            Response::Success(r) => r.data.get("message").and_then(Value::as_str),
            Response::Invalid(r) => Some(&r.message),
            Response::Error(r) => Some(&r.message),
        }
    }
}
