//! Record store
//!
//! The vendor sheet is an external tabular store exposing four row
//! operations: read all, append, insert at, delete at. This module
//! provides the backends that speak to concrete stores and the
//! `RecordStore` adapter that maps record positions onto sheet rows.
//!
//! # Backends
//!
//! - `MemorySheet`: in-process rows
//! - `FileSheet`: rows in a local JSON file
//! - `GoogleSheet`: a worksheet reached over the Sheets REST API
//!
//! No backend offers transactions or locking; the store serializes its
//! own writes.

mod adapter;
mod backend;
mod cache;
mod errors;
mod file;
mod memory;
mod sheets;

pub use adapter::{store_row, ReadOutcome, RecordStore, SheetSnapshot, StoreOptions, HEADER_ROWS};
pub use backend::{select_columns, SheetBackend, SheetOp};
pub use cache::TtlCache;
pub use errors::{StoreError, StoreResult};
pub use file::FileSheet;
pub use memory::MemorySheet;
pub use sheets::{
    a1_range, column_letter, delete_dimension_request, insert_dimension_request,
    parse_value_range, read_range, status_error, GoogleSheet, GoogleSheetConfig,
    SHEETS_API_BASE,
};
