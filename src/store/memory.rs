//! # In-Memory Sheet Backend

use std::collections::HashSet;
use std::sync::{Mutex, MutexGuard};

use super::backend::{select_columns, SheetBackend, SheetOp};
use super::errors::{StoreError, StoreResult};

#[derive(Debug, Default)]
struct MemoryState {
    rows: Vec<Vec<String>>,
    failing: HashSet<SheetOp>,
}

/// Sheet held in process memory.
///
/// Operations can be made to fail on demand to exercise error paths.
#[derive(Debug, Default)]
pub struct MemorySheet {
    state: Mutex<MemoryState>,
}

impl MemorySheet {
    /// Create a sheet containing only `header`
    pub fn new(header: Vec<String>) -> Self {
        Self::with_rows(vec![header])
    }

    /// Create a sheet from raw rows (header first)
    pub fn with_rows(rows: Vec<Vec<String>>) -> Self {
        Self {
            state: Mutex::new(MemoryState {
                rows,
                failing: HashSet::new(),
            }),
        }
    }

    /// Make every subsequent `op` fail with `StoreError::Unavailable`
    pub fn fail_on(&self, op: SheetOp) {
        if let Ok(mut state) = self.state.lock() {
            state.failing.insert(op);
        }
    }

    /// Stop injecting failures
    pub fn heal(&self) {
        if let Ok(mut state) = self.state.lock() {
            state.failing.clear();
        }
    }

    /// Copy of all rows, header included
    pub fn rows(&self) -> Vec<Vec<String>> {
        self.state.lock().map(|s| s.rows.clone()).unwrap_or_default()
    }

    fn lock_for(&self, op: SheetOp) -> StoreResult<MutexGuard<'_, MemoryState>> {
        let state = self
            .state
            .lock()
            .map_err(|_| StoreError::Unavailable("memory sheet lock poisoned".into()))?;
        if state.failing.contains(&op) {
            return Err(StoreError::Unavailable(format!("injected {} failure", op)));
        }
        Ok(state)
    }
}

impl SheetBackend for MemorySheet {
    fn read_rows(&self, columns: Option<&[usize]>) -> StoreResult<Vec<Vec<String>>> {
        let state = self.lock_for(SheetOp::Read)?;
        Ok(select_columns(state.rows.clone(), columns))
    }

    fn append_row(&self, row: &[String]) -> StoreResult<()> {
        let mut state = self.lock_for(SheetOp::Append)?;
        state.rows.push(row.to_vec());
        Ok(())
    }

    fn insert_row(&self, row: &[String], store_row: usize) -> StoreResult<()> {
        let mut state = self.lock_for(SheetOp::Insert)?;
        if store_row == 0 || store_row > state.rows.len() + 1 {
            return Err(StoreError::RowOutOfRange(store_row));
        }
        state.rows.insert(store_row - 1, row.to_vec());
        Ok(())
    }

    fn delete_row(&self, store_row: usize) -> StoreResult<()> {
        let mut state = self.lock_for(SheetOp::Delete)?;
        if store_row == 0 || store_row > state.rows.len() {
            return Err(StoreError::RowOutOfRange(store_row));
        }
        state.rows.remove(store_row - 1);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|c| c.to_string()).collect()
    }

    #[test]
    fn test_insert_and_delete_are_one_based() {
        let sheet = MemorySheet::with_rows(vec![row(&["h"]), row(&["a"]), row(&["c"])]);
        sheet.insert_row(&row(&["b"]), 3).unwrap();
        assert_eq!(sheet.rows()[2], row(&["b"]));

        sheet.delete_row(2).unwrap();
        assert_eq!(sheet.rows(), vec![row(&["h"]), row(&["b"]), row(&["c"])]);
    }

    #[test]
    fn test_out_of_range_rows() {
        let sheet = MemorySheet::new(row(&["h"]));
        assert_eq!(sheet.delete_row(2), Err(StoreError::RowOutOfRange(2)));
        assert_eq!(sheet.insert_row(&row(&["x"]), 5), Err(StoreError::RowOutOfRange(5)));
        assert!(sheet.insert_row(&row(&["x"]), 2).is_ok());
    }

    #[test]
    fn test_injected_failures() {
        let sheet = MemorySheet::new(row(&["h"]));
        sheet.fail_on(SheetOp::Read);
        assert!(matches!(sheet.read_rows(None), Err(StoreError::Unavailable(_))));
        assert!(sheet.append_row(&row(&["a"])).is_ok());

        sheet.heal();
        assert_eq!(sheet.read_rows(None).unwrap().len(), 2);
    }
}
