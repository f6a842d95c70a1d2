//! # Local File Sheet Backend
//!
//! A sheet stored as a JSON array of rows, e.g.
//! `[["Company Name", "Business Type"], ["Acme", "Retailer"]]`.

use std::fs;
use std::path::{Path, PathBuf};

use super::backend::{select_columns, SheetBackend};
use super::errors::{StoreError, StoreResult};

/// JSON-file backed sheet
#[derive(Debug)]
pub struct FileSheet {
    path: PathBuf,
}

impl FileSheet {
    /// Open the sheet at `path`, creating it with `header` when missing
    pub fn open(path: impl Into<PathBuf>, header: &[String]) -> StoreResult<Self> {
        let sheet = Self { path: path.into() };

        if !sheet.path.exists() {
            if let Some(parent) = sheet.path.parent() {
                if !parent.as_os_str().is_empty() {
                    fs::create_dir_all(parent)?;
                }
            }
            sheet.save(&[header.to_vec()])?;
        }

        Ok(sheet)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> StoreResult<Vec<Vec<String>>> {
        let content = fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(Vec::new());
        }
        Ok(serde_json::from_str(&content)?)
    }

    /// Writes a sibling temp file, then renames it over the sheet
    fn save(&self, rows: &[Vec<String>]) -> StoreResult<()> {
        let tmp = self.path.with_extension("json.tmp");
        let content = serde_json::to_string_pretty(rows)?;
        fs::write(&tmp, content)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    fn modify<F>(&self, f: F) -> StoreResult<()>
    where
        F: FnOnce(&mut Vec<Vec<String>>) -> StoreResult<()>,
    {
        let mut rows = self.load()?;
        f(&mut rows)?;
        self.save(&rows)
    }
}

impl SheetBackend for FileSheet {
    fn read_rows(&self, columns: Option<&[usize]>) -> StoreResult<Vec<Vec<String>>> {
        Ok(select_columns(self.load()?, columns))
    }

    fn append_row(&self, row: &[String]) -> StoreResult<()> {
        self.modify(|rows| {
            rows.push(row.to_vec());
            Ok(())
        })
    }

    fn insert_row(&self, row: &[String], store_row: usize) -> StoreResult<()> {
        self.modify(|rows| {
            if store_row == 0 || store_row > rows.len() + 1 {
                return Err(StoreError::RowOutOfRange(store_row));
            }
            rows.insert(store_row - 1, row.to_vec());
            Ok(())
        })
    }

    fn delete_row(&self, store_row: usize) -> StoreResult<()> {
        self.modify(|rows| {
            if store_row == 0 || store_row > rows.len() {
                return Err(StoreError::RowOutOfRange(store_row));
            }
            rows.remove(store_row - 1);
            Ok(())
        })
    }
}
