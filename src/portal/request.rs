//! Portal request types
//!
//! One JSON object per user action:
//!
//! ```json
//! {"action": "update", "vendor": "Acme", "values": {"company_name": "Acme Corp"}}
//! ```
//!
//! `action` accepts the short name (`onboard`) or the menu label
//! (`Onboard New Vendor`). A vendor is targeted by `position` (0-based,
//! from the latest listing) or by `vendor` name; position wins when both
//! are given.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::schema::{FieldValue, FormValues};

use super::errors::{PortalError, PortalResult};

/// User-selectable actions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Onboard,
    Update,
    View,
    Delete,
    /// Describe the form widgets, optionally pre-filled from a vendor
    Form,
    /// List the menu
    Actions,
}

impl Action {
    /// Actions offered in the menu, in display order
    pub const MENU: [Action; 4] = [Action::Onboard, Action::Update, Action::View, Action::Delete];

    pub fn name(&self) -> &'static str {
        match self {
            Action::Onboard => "onboard",
            Action::Update => "update",
            Action::View => "view",
            Action::Delete => "delete",
            Action::Form => "form",
            Action::Actions => "actions",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Action::Onboard => "Onboard New Vendor",
            Action::Update => "Update Existing Vendor",
            Action::View => "View All Vendors",
            Action::Delete => "Delete Vendor",
            Action::Form => "Show Vendor Form",
            Action::Actions => "Choose an Action",
        }
    }

    /// Parse a short name or menu label, ignoring case
    pub fn parse(s: &str) -> Option<Action> {
        let s = s.trim();
        [
            Action::Onboard,
            Action::Update,
            Action::View,
            Action::Delete,
            Action::Form,
            Action::Actions,
        ]
        .into_iter()
        .find(|a| a.name().eq_ignore_ascii_case(s) || a.label().eq_ignore_ascii_case(s))
    }
}

/// Which vendor an action applies to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VendorTarget {
    Position(usize),
    Name(String),
}

impl VendorTarget {
    pub fn describe(&self) -> String {
        match self {
            VendorTarget::Position(p) => format!("at position {}", p),
            VendorTarget::Name(name) => format!("'{}'", name),
        }
    }
}

/// Parsed request
#[derive(Debug, Clone, PartialEq)]
pub enum Request {
    Onboard { values: FormValues },
    Update { target: VendorTarget, values: FormValues },
    View,
    Delete { target: VendorTarget },
    Form { target: Option<VendorTarget> },
    Actions,
}

/// Raw request for parsing
#[derive(Debug, Clone, Deserialize)]
struct RawRequest {
    action: String,
    #[serde(default)]
    vendor: Option<String>,
    #[serde(default)]
    position: Option<usize>,
    /// Null values mean the field was left unset
    #[serde(default)]
    values: Option<HashMap<String, Option<FieldValue>>>,
}

impl RawRequest {
    fn target(&self) -> Option<VendorTarget> {
        match (self.position, &self.vendor) {
            (Some(p), _) => Some(VendorTarget::Position(p)),
            (None, Some(name)) if !name.trim().is_empty() => {
                Some(VendorTarget::Name(name.clone()))
            }
            _ => None,
        }
    }

    fn require_target(&self) -> PortalResult<VendorTarget> {
        self.target()
            .ok_or_else(|| PortalError::InvalidRequest("Missing vendor or position".into()))
    }

    fn require_values(&mut self) -> PortalResult<FormValues> {
        let values = self
            .values
            .take()
            .ok_or_else(|| PortalError::InvalidRequest("Missing values".into()))?;
        Ok(values
            .into_iter()
            .filter_map(|(key, value)| value.map(|v| (key, v)))
            .collect())
    }
}

impl Request {
    /// Parse a request from JSON string
    pub fn parse(json: &str) -> PortalResult<Self> {
        let mut raw: RawRequest = serde_json::from_str(json)
            .map_err(|e| PortalError::InvalidRequest(format!("Invalid JSON: {}", e)))?;

        let action = Action::parse(&raw.action).ok_or_else(|| {
            PortalError::InvalidRequest(format!("Unknown action: {}", raw.action))
        })?;

        match action {
            Action::Onboard => Ok(Request::Onboard {
                values: raw.require_values()?,
            }),
            Action::Update => {
                let target = raw.require_target()?;
                Ok(Request::Update {
                    target,
                    values: raw.require_values()?,
                })
            }
            Action::View => Ok(Request::View),
            Action::Delete => Ok(Request::Delete {
                target: raw.require_target()?,
            }),
            Action::Form => Ok(Request::Form {
                target: raw.target(),
            }),
            Action::Actions => Ok(Request::Actions),
        }
    }

    pub fn action(&self) -> Action {
        match self {
            Request::Onboard { .. } => Action::Onboard,
            Request::Update { .. } => Action::Update,
            Request::View => Action::View,
            Request::Delete { .. } => Action::Delete,
            Request::Form { .. } => Action::Form,
            Request::Actions => Action::Actions,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_onboard() {
        let req = Request::parse(
            r#"{"action": "onboard", "values": {"company_name": "Acme", "years_in_business": 3}}"#,
        )
        .unwrap();
        match req {
            Request::Onboard { values } => {
                assert_eq!(values["years_in_business"], FieldValue::Number(3));
            }
            other => panic!("unexpected request {:?}", other),
        }
    }

    #[test]
    fn test_null_value_is_unset() {
        let req = Request::parse(
            r#"{"action": "onboard", "values": {"company_name": "Acme", "additional_info": null, "years_in_business": 5.0}}"#,
        )
        .unwrap();
        match req {
            Request::Onboard { values } => {
                assert!(!values.contains_key("additional_info"));
                assert_eq!(values["years_in_business"], FieldValue::Number(5));
                assert_eq!(values.len(), 2);
            }
            other => panic!("unexpected request {:?}", other),
        }
    }

    #[test]
    fn test_menu_labels_accepted() {
        let req = Request::parse(r#"{"action": "View All Vendors"}"#).unwrap();
        assert_eq!(req, Request::View);
        assert_eq!(Action::parse("delete vendor"), Some(Action::Delete));
    }

    #[test]
    fn test_position_wins_over_name() {
        let req = Request::parse(r#"{"action": "delete", "vendor": "Acme", "position": 2}"#).unwrap();
        assert_eq!(
            req,
            Request::Delete {
                target: VendorTarget::Position(2)
            }
        );
    }

    #[test]
    fn test_missing_fields_rejected() {
        assert!(Request::parse(r#"{"action": "delete"}"#).is_err());
        assert!(Request::parse(r#"{"action": "update", "vendor": "Acme"}"#).is_err());
        assert!(Request::parse(r#"{"action": "onboard"}"#).is_err());
        assert!(Request::parse(r#"{"action": "launch"}"#).is_err());
        assert!(Request::parse("not json").is_err());
    }

    #[test]
    fn test_blank_vendor_name_is_no_target() {
        let req = Request::parse(r#"{"action": "form", "vendor": "  "}"#).unwrap();
        assert_eq!(req, Request::Form { target: None });
    }
}
