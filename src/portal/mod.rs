//! Vendor portal
//!
//! Menu-driven front end over the form schema and the record store.
//!
//! # Supported Actions
//!
//! - onboard (Onboard New Vendor)
//! - update (Update Existing Vendor)
//! - view (View All Vendors)
//! - delete (Delete Vendor)
//! - form: widget descriptors, blank or pre-filled
//! - actions: the menu itself

mod errors;
mod handler;
mod request;
mod response;
pub mod render;

pub use errors::{PortalError, PortalErrorCode, PortalResult};
pub use handler::{listing_json, PortalHandler, NAME_FIELD};
pub use request::{Action, Request, VendorTarget};
pub use response::{ErrorResponse, InvalidResponse, Response, SuccessResponse};
