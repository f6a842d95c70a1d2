//! Record store adapter
//!
//! Translates record operations into sheet row operations:
//!
//! - Row 1 of the sheet is the header
//! - Data position `p` (0-based) lives at sheet row `p + 2`
//! - Entirely empty data rows are dropped on read but keep their
//!   position, so later records still map to their own rows
//!
//! Positions come from the caller's most recent `read_all`. They are not
//! re-checked here: if the sheet changed in between, a mutation acts on
//! whatever row now sits at that position.

use std::time::Duration;

use tracing::{debug, info, warn};

use crate::record::VendorRecord;

use super::backend::{SheetBackend, SheetOp};
use super::cache::TtlCache;
use super::errors::{StoreError, StoreResult};

/// Sheet rows occupied by the header
pub const HEADER_ROWS: usize = 1;

/// Sheet row (1-based) holding data position `position` (0-based)
pub fn store_row(position: usize) -> usize {
    position + HEADER_ROWS + 1
}

/// Header and data rows from one read
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SheetSnapshot {
    pub header: Vec<String>,
    pub records: Vec<VendorRecord>,
    /// Data position of each record, blank rows included in the count
    pub positions: Vec<usize>,
}

impl SheetSnapshot {
    /// Splits raw rows into header and non-blank, header-width records
    pub fn from_rows(rows: Vec<Vec<String>>) -> Self {
        let mut rows = rows.into_iter();
        let header = rows.next().unwrap_or_default();
        let width = header.len();

        let (positions, records) = rows
            .map(VendorRecord::new)
            .enumerate()
            .filter(|(_, r)| !r.is_blank())
            .map(|(position, r)| (position, r.padded(width)))
            .unzip();

        Self {
            header,
            records,
            positions,
        }
    }

    /// Data position of the `index`-th listed record
    pub fn position(&self, index: usize) -> Option<usize> {
        self.positions.get(index).copied()
    }
}

/// Result of `read_all`.
///
/// A failed read yields an empty snapshot together with the error, so
/// callers can always render something.
#[derive(Debug, Clone)]
pub struct ReadOutcome {
    pub snapshot: SheetSnapshot,
    pub error: Option<StoreError>,
}

impl ReadOutcome {
    pub fn records(&self) -> &[VendorRecord] {
        &self.snapshot.records
    }

    pub fn header(&self) -> &[String] {
        &self.snapshot.header
    }

    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }

    /// The snapshot, or the error if the read failed
    pub fn into_result(self) -> StoreResult<SheetSnapshot> {
        match self.error {
            Some(e) => Err(e),
            None => Ok(self.snapshot),
        }
    }
}

/// Options for a record store
#[derive(Debug, Clone, Default)]
pub struct StoreOptions {
    /// Restrict reads to these 0-based columns
    pub columns: Option<Vec<usize>>,
    /// How long a read stays fresh; zero disables caching
    pub cache_ttl: Duration,
}

/// Record-level access to one sheet.
///
/// Constructed per session and passed to whoever needs it.
#[derive(Debug)]
pub struct RecordStore<B: SheetBackend> {
    backend: B,
    columns: Option<Vec<usize>>,
    cache: TtlCache<SheetSnapshot>,
}

impl<B: SheetBackend> RecordStore<B> {
    pub fn new(backend: B, options: StoreOptions) -> Self {
        Self {
            backend,
            columns: options.columns,
            cache: TtlCache::new(options.cache_ttl),
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Fetch all non-empty data rows in sheet order.
    ///
    /// Never fails: a fetch error is reported in the outcome alongside an
    /// empty snapshot.
    pub fn read_all(&mut self) -> ReadOutcome {
        if let Some(snapshot) = self.cache.get() {
            debug!(records = snapshot.records.len(), "serving cached sheet read");
            return ReadOutcome {
                snapshot: snapshot.clone(),
                error: None,
            };
        }

        match self.backend.read_rows(self.columns.as_deref()) {
            Ok(rows) => {
                let snapshot = SheetSnapshot::from_rows(rows);
                debug!(records = snapshot.records.len(), "fetched sheet");
                self.cache.put(snapshot.clone());
                ReadOutcome {
                    snapshot,
                    error: None,
                }
            }
            Err(e) => {
                warn!(op = %SheetOp::Read, error = %e, "sheet read failed");
                ReadOutcome {
                    snapshot: SheetSnapshot::default(),
                    error: Some(e),
                }
            }
        }
    }

    /// Append `record` after the last row
    pub fn append(&mut self, record: &VendorRecord) -> StoreResult<()> {
        self.cache.invalidate();
        self.backend.append_row(record.cells()).map_err(|e| {
            warn!(op = %SheetOp::Append, error = %e, "append failed");
            e
        })?;
        info!(cells = record.len(), "appended record");
        Ok(())
    }

    /// Replace the record at `position` by deleting its row and inserting
    /// `record` at the same row.
    ///
    /// The two steps are not atomic. When the insert fails after the
    /// delete succeeded, `StoreError::PartialUpdate` is returned and the
    /// old row is gone.
    pub fn update_at(&mut self, position: usize, record: &VendorRecord) -> StoreResult<()> {
        self.cache.invalidate();
        let row = store_row(position);

        self.backend.delete_row(row).map_err(|e| {
            warn!(op = %SheetOp::Delete, position, error = %e, "update aborted before any change");
            e
        })?;

        self.backend.insert_row(record.cells(), row).map_err(|e| {
            warn!(op = %SheetOp::Insert, position, error = %e, "update lost the row");
            StoreError::PartialUpdate {
                position,
                reason: e.to_string(),
            }
        })?;

        info!(position, "updated record");
        Ok(())
    }

    /// Remove the record at `position`
    pub fn delete_at(&mut self, position: usize) -> StoreResult<()> {
        self.cache.invalidate();
        self.backend.delete_row(store_row(position)).map_err(|e| {
            warn!(op = %SheetOp::Delete, position, error = %e, "delete failed");
            e
        })?;
        info!(position, "deleted record");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemorySheet;

    fn row(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|c| c.to_string()).collect()
    }

    fn store_with(rows: Vec<Vec<String>>, ttl: Duration) -> RecordStore<MemorySheet> {
        RecordStore::new(
            MemorySheet::with_rows(rows),
            StoreOptions {
                columns: None,
                cache_ttl: ttl,
            },
        )
    }

    #[test]
    fn test_store_row_mapping() {
        assert_eq!(store_row(0), 2);
        assert_eq!(store_row(9), 11);
    }

    #[test]
    fn test_snapshot_drops_blank_rows_and_pads() {
        let snapshot = SheetSnapshot::from_rows(vec![
            row(&["Company Name", "Status"]),
            row(&["Acme"]),
            row(&["", ""]),
            row(&[]),
            row(&["Globex", "Active"]),
        ]);
        assert_eq!(snapshot.header, row(&["Company Name", "Status"]));
        assert_eq!(snapshot.records.len(), 2);
        assert_eq!(snapshot.records[0].cells(), ["Acme", ""]);
        assert_eq!(snapshot.positions, vec![0, 3]);
        assert_eq!(snapshot.position(1), Some(3));
        assert_eq!(snapshot.position(2), None);
    }

    #[test]
    fn test_empty_sheet_reads_as_empty() {
        let mut store = store_with(Vec::new(), Duration::ZERO);
        let outcome = store.read_all();
        assert!(outcome.is_ok());
        assert!(outcome.records().is_empty());
        assert!(outcome.header().is_empty());
    }

    #[test]
    fn test_cached_read_skips_backend() {
        let mut store = store_with(
            vec![row(&["Company Name"]), row(&["Acme"])],
            Duration::from_secs(60),
        );
        assert_eq!(store.read_all().records().len(), 1);

        store.backend().fail_on(SheetOp::Read);
        let outcome = store.read_all();
        assert!(outcome.is_ok());
        assert_eq!(outcome.records().len(), 1);
    }

    #[test]
    fn test_mutation_invalidates_cache() {
        let mut store = store_with(vec![row(&["Company Name"])], Duration::from_secs(60));
        assert!(store.read_all().records().is_empty());

        store.append(&VendorRecord::from(["Acme"])).unwrap();
        assert_eq!(store.read_all().records().len(), 1);
    }

    #[test]
    fn test_read_failure_is_reported_not_raised() {
        let mut store = store_with(vec![row(&["Company Name"]), row(&["Acme"])], Duration::ZERO);
        store.backend().fail_on(SheetOp::Read);

        let outcome = store.read_all();
        assert!(outcome.records().is_empty());
        assert!(matches!(outcome.error, Some(StoreError::Unavailable(_))));
        assert!(outcome.into_result().is_err());
    }

    #[test]
    fn test_partial_update_is_distinct() {
        let mut store = store_with(
            vec![row(&["Company Name"]), row(&["Acme"]), row(&["Globex"])],
            Duration::ZERO,
        );
        store.backend().fail_on(SheetOp::Insert);

        let err = store
            .update_at(0, &VendorRecord::from(["Acme Corp"]))
            .unwrap_err();
        assert!(matches!(err, StoreError::PartialUpdate { position: 0, .. }));

        store.backend().heal();
        let names: Vec<_> = store
            .read_all()
            .records()
            .iter()
            .map(|r| r.cells()[0].clone())
            .collect();
        assert_eq!(names, vec!["Globex"]);
    }

    #[test]
    fn test_failed_delete_leaves_update_untouched() {
        let mut store = store_with(vec![row(&["Company Name"]), row(&["Acme"])], Duration::ZERO);
        store.backend().fail_on(SheetOp::Delete);

        let err = store.update_at(0, &VendorRecord::from(["X"])).unwrap_err();
        assert!(matches!(err, StoreError::Unavailable(_)));

        store.backend().heal();
        assert_eq!(store.read_all().records()[0].cells(), ["Acme"]);
    }
}
