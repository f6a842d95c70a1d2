//! vendor-portal: schema-driven vendor onboarding over a spreadsheet
//!
//! - `schema`: form field definitions and the pure validator
//! - `record`: form values to sheet rows and back
//! - `store`: positional record access over a sheet backend
//! - `portal`: user actions, responses and form rendering
//! - `cli`: command-line entry point

pub mod cli;
pub mod observability;
pub mod portal;
pub mod record;
pub mod schema;
pub mod store;
