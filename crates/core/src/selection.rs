//! The selection model: an ordered set of selected rows.
//!
//! Insertion order is selection order. A row appears at most once. The
//! visual "selected" marker lives on the host side; the controller re-syncs
//! markers whenever the set changes, so set membership and marker state
//! never drift apart.

use crate::handle::RowId;

/// Ordered set of selected rows, no duplicates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionSet {
    rows: Vec<RowId>,
}

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a row if absent. Returns true if the set changed.
    pub fn insert(&mut self, row: RowId) -> bool {
        if self.contains(row) {
            return false;
        }
        self.rows.push(row);
        true
    }

    /// Remove a row if present. Returns true if the set changed.
    pub fn remove(&mut self, row: RowId) -> bool {
        let before = self.rows.len();
        self.rows.retain(|&r| r != row);
        self.rows.len() != before
    }

    /// Flip a row's membership. Returns true if the row is selected afterwards.
    pub fn toggle(&mut self, row: RowId) -> bool {
        if self.remove(row) {
            false
        } else {
            self.rows.push(row);
            true
        }
    }

    /// Remove all rows, returning them in selection order.
    pub fn clear(&mut self) -> Vec<RowId> {
        std::mem::take(&mut self.rows)
    }

    pub fn contains(&self, row: RowId) -> bool {
        self.rows.contains(&row)
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Selected rows in selection order.
    pub fn rows(&self) -> &[RowId] {
        &self.rows
    }

    pub fn iter(&self) -> impl Iterator<Item = RowId> + '_ {
        self.rows.iter().copied()
    }
}
