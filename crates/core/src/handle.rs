//! Opaque handles for host-owned table elements.
//!
//! Rows, cells, and edit inputs are created and destroyed by the external
//! table component. The controller never dereferences these handles; every
//! read or write goes back through the host. Handles minted before a grid
//! refresh are stale afterwards and must be discarded.

use serde::{Deserialize, Serialize};

/// Unique identifier for a rendered table row, minted by the host.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RowId(u64);

impl RowId {
    pub fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    pub fn raw(&self) -> u64 {
        self.0
    }
}

/// Identifies a cell as a row plus a 0-based column index.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CellId {
    pub row: RowId,
    pub col: usize,
}

impl CellId {
    #[inline]
    pub fn new(row: RowId, col: usize) -> Self {
        Self { row, col }
    }
}

impl std::fmt::Display for CellId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "row{}:col{}", self.row.raw(), self.col)
    }
}

/// Identifier for an input element mounted inside a cell in editing state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InputId(u64);

impl InputId {
    pub fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    pub fn raw(&self) -> u64 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_id_equality() {
        let a = CellId::new(RowId::from_raw(1), 1);
        let b = CellId::new(RowId::from_raw(1), 1);
        let c = CellId::new(RowId::from_raw(2), 1);

        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_ne!(a, CellId::new(RowId::from_raw(1), 2));
    }

    #[test]
    fn test_cell_id_display() {
        let cell = CellId::new(RowId::from_raw(7), 1);
        assert_eq!(cell.to_string(), "row7:col1");
    }
}
