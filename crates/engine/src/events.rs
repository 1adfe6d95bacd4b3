//! Controller event notifications.
//!
//! Every failure in this controller degrades to "the requested edit did not
//! happen"; these events are the visible, non-blocking feedback channel a
//! host can surface as status messages. The test harness also asserts on
//! them to verify ordering invariants.

use stylegrid_core::CellId;

use crate::host::StyleRequest;

/// Events emitted by the controller as commands execute.
#[derive(Debug, Clone, PartialEq)]
pub enum ControllerEvent {
    /// Selection membership changed.
    SelectionChanged(SelectionChangedEvent),

    /// A filter pass completed.
    FilterApplied(FilterAppliedEvent),

    /// An edit was queued and the activate-edit gesture dispatched.
    EditQueued { cell: CellId },

    /// A queued edit reached its mounted input and was committed.
    EditApplied { cell: CellId },

    /// A queued edit was dropped: no input mounted before the deadline, or
    /// the grid refreshed underneath it.
    EditDropped { cell: CellId },

    /// A batch of outbound requests was issued.
    RequestsIssued { count: usize },

    /// A request failed after its retry was exhausted.
    RequestFailed { request: StyleRequest, error: String },

    /// All requests in a batch completed and a refresh was requested.
    RefreshRequested,
}

/// Selection membership after a mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionChangedEvent {
    pub selected: usize,
}

/// Outcome of one filter pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterAppliedEvent {
    /// Non-header rows left visible.
    pub visible: usize,
    /// The pattern failed to compile (regex mode only).
    pub invalid_pattern: bool,
}

/// Simple event collector, used by hosts that want a feedback queue and by
/// the test harness.
#[derive(Debug, Default)]
pub struct EventCollector {
    events: Vec<ControllerEvent>,
}

impl EventCollector {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn push(&mut self, event: ControllerEvent) {
        self.events.push(event);
    }

    pub fn events(&self) -> &[ControllerEvent] {
        &self.events
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Filter to only FilterApplied events.
    pub fn filters_applied(&self) -> Vec<&FilterAppliedEvent> {
        self.events
            .iter()
            .filter_map(|e| match e {
                ControllerEvent::FilterApplied(f) => Some(f),
                _ => None,
            })
            .collect()
    }

    /// Cells whose queued edits were dropped.
    pub fn edits_dropped(&self) -> Vec<CellId> {
        self.events
            .iter()
            .filter_map(|e| match e {
                ControllerEvent::EditDropped { cell } => Some(*cell),
                _ => None,
            })
            .collect()
    }

    /// Cells whose queued edits were applied and committed.
    pub fn edits_applied(&self) -> Vec<CellId> {
        self.events
            .iter()
            .filter_map(|e| match e {
                ControllerEvent::EditApplied { cell } => Some(*cell),
                _ => None,
            })
            .collect()
    }

    /// Requests that failed after retry.
    pub fn requests_failed(&self) -> Vec<(&StyleRequest, &str)> {
        self.events
            .iter()
            .filter_map(|e| match e {
                ControllerEvent::RequestFailed { request, error } => {
                    Some((request, error.as_str()))
                }
                _ => None,
            })
            .collect()
    }

    /// Number of RefreshRequested events.
    pub fn refreshes_requested(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, ControllerEvent::RefreshRequested))
            .count()
    }
}
