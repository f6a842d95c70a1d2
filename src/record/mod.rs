//! Vendor records and their row encoding
//!
//! A record is the ordered tuple of cell strings written to one sheet
//! row, one cell per schema field. Records carry no identity of their
//! own: they are addressed by position in the most recent read.

mod codec;

pub use codec::{first_position_named, RecordCodec, LIST_SEPARATOR};

use serde::{Deserialize, Serialize};

/// One data row of the vendor sheet
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VendorRecord {
    cells: Vec<String>,
}

impl VendorRecord {
    pub fn new(cells: Vec<String>) -> Self {
        Self { cells }
    }

    pub fn cells(&self) -> &[String] {
        &self.cells
    }

    pub fn into_cells(self) -> Vec<String> {
        self.cells
    }

    pub fn get(&self, column: usize) -> Option<&str> {
        self.cells.get(column).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// True when every cell is blank (or there are no cells)
    pub fn is_blank(&self) -> bool {
        self.cells.iter().all(|c| c.trim().is_empty())
    }

    /// Pads with empty cells up to `width`.
    ///
    /// Stores drop trailing empty cells, so short rows are normal.
    pub fn padded(mut self, width: usize) -> Self {
        if self.cells.len() < width {
            self.cells.resize(width, String::new());
        }
        self
    }
}

impl From<Vec<String>> for VendorRecord {
    fn from(cells: Vec<String>) -> Self {
        Self::new(cells)
    }
}

impl<const N: usize> From<[&str; N]> for VendorRecord {
    fn from(cells: [&str; N]) -> Self {
        Self::new(cells.iter().map(|c| c.to_string()).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_detection() {
        assert!(VendorRecord::from(["", " ", ""]).is_blank());
        assert!(VendorRecord::default().is_blank());
        assert!(!VendorRecord::from(["", "x"]).is_blank());
    }

    #[test]
    fn test_padding() {
        let record = VendorRecord::from(["Acme"]).padded(3);
        assert_eq!(record.cells(), ["Acme", "", ""]);
        let record = VendorRecord::from(["a", "b", "c"]).padded(2);
        assert_eq!(record.len(), 3);
    }

    #[test]
    fn test_serializes_as_plain_array() {
        let json = serde_json::to_string(&VendorRecord::from(["a", "b"])).unwrap();
        assert_eq!(json, r#"["a","b"]"#);
    }
}
