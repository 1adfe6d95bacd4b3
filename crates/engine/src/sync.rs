//! Update synchronizer: pushes a new cell value across the component
//! boundary.
//!
//! The table component only accepts changes made through its own edit input
//! and event wiring, so the controller simulates a real user edit:
//!
//! 1. dispatch the synthetic activate-edit gesture at the cell
//!    (`GridHost::begin_edit`); the input mounts asynchronously;
//! 2. when the host reports the mount (`edit_mounted`), set the input's
//!    value and dispatch the synthetic commit gesture.
//!
//! Each pending edit carries a deadline. If the mount never happens (the
//! cell was removed by a concurrent refresh, or the component ignored the
//! gesture), `expire_overdue` drops the edit and the controller reports it,
//! instead of the silent timer-based drop this replaces.

use std::time::{Duration, Instant};

use stylegrid_core::{CellId, InputId};

use crate::host::GridHost;

/// An edit waiting for its input to mount.
#[derive(Debug, Clone)]
struct PendingEdit {
    cell: CellId,
    text: String,
    deadline: Instant,
}

/// Queue of in-flight cell edits.
#[derive(Debug)]
pub struct UpdateSynchronizer {
    pending: Vec<PendingEdit>,
    mount_timeout: Duration,
}

impl UpdateSynchronizer {
    pub fn new(mount_timeout: Duration) -> Self {
        Self {
            pending: Vec::new(),
            mount_timeout,
        }
    }

    /// Queue a new value for a cell and dispatch the activate-edit gesture.
    ///
    /// A second edit queued for the same cell before the first mounts
    /// replaces it: the target input is the same, so the last value wins.
    pub fn queue_edit(&mut self, cell: CellId, text: String, now: Instant, host: &mut dyn GridHost) {
        self.pending.retain(|p| p.cell != cell);
        self.pending.push(PendingEdit {
            cell,
            text,
            deadline: now + self.mount_timeout,
        });
        host.begin_edit(cell);
    }

    /// The host reports that an edit input mounted in `cell`. Completes the
    /// pending edit: set the value, dispatch the commit gesture. Returns
    /// true if an edit was pending for that cell; a mount with no pending
    /// edit (user-initiated, or already expired) is ignored.
    pub fn edit_mounted(&mut self, cell: CellId, input: InputId, host: &mut dyn GridHost) -> bool {
        let Some(idx) = self.pending.iter().position(|p| p.cell == cell) else {
            return false;
        };
        let edit = self.pending.remove(idx);
        host.set_input_value(input, &edit.text);
        host.commit_input(input);
        true
    }

    /// Drop every pending edit whose deadline has passed, returning the
    /// affected cells.
    pub fn expire_overdue(&mut self, now: Instant) -> Vec<CellId> {
        let mut dropped = Vec::new();
        self.pending.retain(|p| {
            if now >= p.deadline {
                dropped.push(p.cell);
                false
            } else {
                true
            }
        });
        dropped
    }

    /// Discard everything, returning the affected cells. Used when the grid
    /// refreshes and every cell handle goes stale.
    pub fn clear(&mut self) -> Vec<CellId> {
        self.pending.drain(..).map(|p| p.cell).collect()
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }
}
