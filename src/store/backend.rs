//! # Sheet Backend Trait
//!
//! Rows are addressed the way spreadsheets address them: 1-based, with
//! row 1 holding the header.

use std::fmt;

use super::errors::StoreResult;

/// Operations a sheet backend performs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SheetOp {
    Read,
    Append,
    Insert,
    Delete,
}

impl SheetOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            SheetOp::Read => "read",
            SheetOp::Append => "append",
            SheetOp::Insert => "insert",
            SheetOp::Delete => "delete",
        }
    }
}

impl fmt::Display for SheetOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Backend trait for tabular stores
pub trait SheetBackend: fmt::Debug {
    /// Read every row, header included, keeping only `columns` when given
    fn read_rows(&self, columns: Option<&[usize]>) -> StoreResult<Vec<Vec<String>>>;

    /// Append a row after the last one
    fn append_row(&self, row: &[String]) -> StoreResult<()>;

    /// Insert a row so that it becomes `store_row`
    fn insert_row(&self, row: &[String], store_row: usize) -> StoreResult<()>;

    /// Delete `store_row`, shifting later rows up
    fn delete_row(&self, store_row: usize) -> StoreResult<()>;
}

impl<B: SheetBackend + ?Sized> SheetBackend for Box<B> {
    fn read_rows(&self, columns: Option<&[usize]>) -> StoreResult<Vec<Vec<String>>> {
        (**self).read_rows(columns)
    }

    fn append_row(&self, row: &[String]) -> StoreResult<()> {
        (**self).append_row(row)
    }

    fn insert_row(&self, row: &[String], store_row: usize) -> StoreResult<()> {
        (**self).insert_row(row, store_row)
    }

    fn delete_row(&self, store_row: usize) -> StoreResult<()> {
        (**self).delete_row(store_row)
    }
}

/// Keeps only the listed columns of every row.
///
/// Missing cells become empty strings so every row has `columns.len()` cells.
pub fn select_columns(rows: Vec<Vec<String>>, columns: Option<&[usize]>) -> Vec<Vec<String>> {
    match columns {
        None => rows,
        Some(columns) => rows
            .into_iter()
            .map(|row| {
                columns
                    .iter()
                    .map(|&c| row.get(c).cloned().unwrap_or_default())
                    .collect()
            })
            .collect(),
    }
}
