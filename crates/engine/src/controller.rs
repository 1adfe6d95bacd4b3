//! The grid controller.
//!
//! One instance per grid mount. Owns the selection set, the filter state,
//! the pending-edit queue, and the in-flight request batches; everything is
//! mutated from host-driven handlers on a single logical thread. The
//! asynchronous boundaries (clipboard reads, edit mounts, request
//! completions) come back in through explicit methods rather than ambient
//! callbacks.

use std::collections::{HashMap, HashSet};
use std::time::Instant;

use stylegrid_core::{CellId, FilterMode, FilterState, InputId, RowId, SelectionSet};

use crate::dispatch::{Dispatch, Key, KeyEvent, Modifiers, Target};
use crate::events::{ControllerEvent, EventCollector, FilterAppliedEvent, SelectionChangedEvent};
use crate::filter::apply_filter;
use crate::host::{Control, GridHost, PasteTicket, PromptKind, RequestId, RowMarker, StyleRequest};
use crate::settings::Settings;
use crate::sync::UpdateSynchronizer;

/// Column whose cell label is the row's style name.
pub const STYLE_NAME_COL: usize = 1;

/// Style-file selector sentinel meaning "prompt for a new file".
pub const CREATE_NEW_SENTINEL: &str = "--Create New--";

/// Interactive controller for a style-record grid.
pub struct GridController {
    settings: Settings,
    selection: SelectionSet,
    filter: FilterState,
    sync: UpdateSynchronizer,
    /// Outstanding clipboard reads and their paste targets.
    pending_pastes: Vec<(PasteTicket, CellId)>,
    /// Requests issued but not yet completed.
    inflight: HashMap<RequestId, StyleRequest>,
    /// Requests already retried once.
    retried: HashSet<RequestId>,
    /// Requests whose completion gates the next refresh.
    refresh_batch: HashSet<RequestId>,
    next_ticket: u64,
    next_request: u64,
    events: EventCollector,
}

impl GridController {
    pub fn new(settings: Settings) -> Self {
        let sync = UpdateSynchronizer::new(settings.edit_mount_timeout());
        Self {
            settings,
            selection: SelectionSet::new(),
            filter: FilterState::default(),
            sync,
            pending_pastes: Vec::new(),
            inflight: HashMap::new(),
            retried: HashSet::new(),
            refresh_batch: HashSet::new(),
            next_ticket: 0,
            next_request: 0,
            events: EventCollector::new(),
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn selection(&self) -> &SelectionSet {
        &self.selection
    }

    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    pub fn events(&self) -> &EventCollector {
        &self.events
    }

    pub fn clear_events(&mut self) {
        self.events.clear();
    }

    /// The style name derived from a row: the label of its second cell.
    pub fn style_name(&self, row: RowId, host: &dyn GridHost) -> Option<String> {
        host.cell_label(CellId::new(row, STYLE_NAME_COL))
    }

    // ── Filtering ───────────────────────────────────────────────────

    /// Apply a new filter, echoing the inputs for UI binding.
    pub fn set_filter(
        &mut self,
        text: &str,
        mode: FilterMode,
        host: &mut dyn GridHost,
    ) -> (String, FilterMode) {
        self.filter = FilterState::new(text, mode);
        let outcome = apply_filter(&self.filter, host);
        self.events
            .push(ControllerEvent::FilterApplied(FilterAppliedEvent {
                visible: outcome.visible,
                invalid_pattern: outcome.invalid_pattern,
            }));
        (self.filter.text.clone(), self.filter.mode)
    }

    // ── Selection ───────────────────────────────────────────────────

    pub fn select_row(&mut self, row: RowId, host: &mut dyn GridHost) {
        if self.selection.insert(row) {
            host.set_row_marker(row, RowMarker::Selected);
            self.emit_selection_changed();
        }
    }

    pub fn toggle_row(&mut self, row: RowId, host: &mut dyn GridHost) {
        let selected = self.selection.toggle(row);
        let marker = if selected {
            RowMarker::Selected
        } else {
            RowMarker::Neutral
        };
        host.set_row_marker(row, marker);
        self.emit_selection_changed();
    }

    /// Empty the selection, resetting every row to the neutral marker.
    pub fn clear_selection(&mut self, host: &mut dyn GridHost) {
        let rows = self.selection.clear();
        if rows.is_empty() {
            return;
        }
        for row in rows {
            host.set_row_marker(row, RowMarker::Neutral);
        }
        self.emit_selection_changed();
    }

    fn emit_selection_changed(&mut self) {
        self.events
            .push(ControllerEvent::SelectionChanged(SelectionChangedEvent {
                selected: self.selection.len(),
            }));
    }

    /// Primary click. Clears the selection first unless the multi-select
    /// modifier is held; a click on a row then selects (or toggles, with
    /// the modifier). Clicks are never suppressed.
    pub fn handle_click(
        &mut self,
        target: Target,
        modifiers: Modifiers,
        host: &mut dyn GridHost,
    ) -> Dispatch {
        if !modifiers.primary {
            self.clear_selection(host);
        }
        if let Some(cell) = target.cell() {
            if modifiers.primary {
                self.toggle_row(cell.row, host);
            } else {
                self.select_row(cell.row, host);
            }
        }
        Dispatch::PassThrough
    }

    /// Secondary-button (context) gesture. With the "allow native menu"
    /// modifier the controller ignores the gesture entirely; otherwise a
    /// gesture on a row selects it (toggling with the multi-select
    /// modifier) and suppresses the native menu.
    pub fn handle_context_menu(
        &mut self,
        target: Target,
        modifiers: Modifiers,
        host: &mut dyn GridHost,
    ) -> Dispatch {
        if modifiers.shift {
            return Dispatch::PassThrough;
        }
        let Some(cell) = target.cell() else {
            return Dispatch::PassThrough;
        };
        if modifiers.primary {
            self.toggle_row(cell.row, host);
        } else {
            self.clear_selection(host);
            self.select_row(cell.row, host);
        }
        Dispatch::Handled
    }

    // ── Command dispatch ────────────────────────────────────────────

    /// Classify a keyboard event, in capture order before any other
    /// handler. Unrecognized events on non-editing targets are suppressed
    /// so chords never leak into the host page's shortcut handling.
    pub fn handle_key(&mut self, event: &KeyEvent, host: &mut dyn GridHost) -> Dispatch {
        // Typing inside an editing cell is the table component's business.
        if event.target.is_editing() && !event.modifiers.primary {
            return Dispatch::PassThrough;
        }

        if let Some(chord) = event.chord_char() {
            if chord == 'c' {
                self.copy_cell(event.target, host);
                return Dispatch::Handled;
            }
            if chord == 'x' {
                self.cut_cell(event.target, host);
                return Dispatch::Handled;
            }
            if chord == 'v' {
                self.paste_into(event.target, host);
                return Dispatch::Handled;
            }
            if chord == self.settings.move_key && !self.selection.is_empty() {
                self.move_selected(host);
                return Dispatch::Handled;
            }
        }

        if matches!(event.key, Key::Backspace | Key::Delete)
            && !event.target.is_editing()
            && !self.selection.is_empty()
        {
            self.delete_selected(host);
            return Dispatch::Handled;
        }

        // Default-deny.
        Dispatch::Handled
    }

    // ── Clipboard bridge ────────────────────────────────────────────

    /// Copy the label under the target to the system clipboard. Silent
    /// no-op when the target has no label cell.
    fn copy_cell(&mut self, target: Target, host: &mut dyn GridHost) {
        let Some(cell) = target.cell() else { return };
        let Some(label) = host.cell_label(cell) else { return };
        host.clipboard_write(&label);
    }

    /// Copy, then blank the cell through the synchronizer.
    fn cut_cell(&mut self, target: Target, host: &mut dyn GridHost) {
        let Some(cell) = target.cell() else { return };
        let Some(label) = host.cell_label(cell) else { return };
        host.clipboard_write(&label);
        self.queue_edit(cell, String::new(), Instant::now(), host);
    }

    /// Start an asynchronous clipboard read targeting the cell. Each paste
    /// command spawns an independent read; completions apply in resolution
    /// order (last write wins on the target cell).
    fn paste_into(&mut self, target: Target, host: &mut dyn GridHost) {
        let Some(cell) = target.cell() else { return };
        let ticket = PasteTicket(self.next_ticket);
        self.next_ticket += 1;
        self.pending_pastes.push((ticket, cell));
        host.clipboard_read(ticket);
    }

    /// The host delivers the text of a completed clipboard read.
    pub fn paste_resolved(&mut self, ticket: PasteTicket, text: &str, host: &mut dyn GridHost) {
        let Some(idx) = self.pending_pastes.iter().position(|(t, _)| *t == ticket) else {
            log::debug!("clipboard read {:?} resolved after its target went stale", ticket);
            return;
        };
        let (_, cell) = self.pending_pastes.remove(idx);
        self.queue_edit(cell, text.to_string(), Instant::now(), host);
    }

    // ── Update synchronizer ─────────────────────────────────────────

    /// Queue a new value for a cell and dispatch the activate-edit gesture.
    pub fn queue_edit(
        &mut self,
        cell: CellId,
        text: String,
        now: Instant,
        host: &mut dyn GridHost,
    ) {
        self.sync.queue_edit(cell, text, now, host);
        self.events.push(ControllerEvent::EditQueued { cell });
    }

    /// The host reports that an edit input mounted in `cell`.
    pub fn edit_mounted(&mut self, cell: CellId, input: InputId, host: &mut dyn GridHost) {
        if self.sync.edit_mounted(cell, input, host) {
            self.events.push(ControllerEvent::EditApplied { cell });
        } else {
            log::debug!("input mounted in {} with no pending edit", cell);
        }
    }

    /// Drop queued edits whose mount deadline has passed. Hosts call this
    /// from their timer tick.
    pub fn expire_pending(&mut self, now: Instant) {
        for cell in self.sync.expire_overdue(now) {
            log::warn!("edit for {} dropped: no input mounted before deadline", cell);
            self.events.push(ControllerEvent::EditDropped { cell });
        }
    }

    pub fn pending_edit_count(&self) -> usize {
        self.sync.pending_count()
    }

    // ── Outbound requests ───────────────────────────────────────────

    /// Prompt for a destination prefix and move every selected style.
    /// Cancelled or empty prompt means no-op.
    fn move_selected(&mut self, host: &mut dyn GridHost) {
        let dest = host
            .prompt_text(PromptKind::MoveDestination, "Move selected styles to")
            .unwrap_or_default();
        if dest.is_empty() {
            return;
        }
        let rows = self.selection.rows().to_vec();
        let mut requests = Vec::new();
        for row in rows {
            if let Some(style) = self.style_name(row, host) {
                requests.push(StyleRequest::Move {
                    style,
                    new_prefix: dest.clone(),
                });
            }
        }
        self.issue_batch(requests, host);
    }

    /// Delete every selected style.
    fn delete_selected(&mut self, host: &mut dyn GridHost) {
        let rows = self.selection.rows().to_vec();
        let mut requests = Vec::new();
        for row in rows {
            if let Some(style) = self.style_name(row, host) {
                requests.push(StyleRequest::Delete { style });
            }
        }
        self.issue_batch(requests, host);
    }

    /// Issue one request per entry and clear the selection. The refresh is
    /// gated on the whole batch completing, not on dispatch.
    fn issue_batch(&mut self, requests: Vec<StyleRequest>, host: &mut dyn GridHost) {
        if !requests.is_empty() {
            self.events.push(ControllerEvent::RequestsIssued {
                count: requests.len(),
            });
            for request in requests {
                let id = RequestId(self.next_request);
                self.next_request += 1;
                self.inflight.insert(id, request.clone());
                self.refresh_batch.insert(id);
                host.issue_request(id, request);
            }
        }
        self.clear_selection(host);
    }

    /// The host delivers the outcome of an outbound request. A failure is
    /// retried once; a second failure is logged and surfaced, and still
    /// counts toward batch completion so the refresh is never wedged.
    pub fn request_completed(
        &mut self,
        id: RequestId,
        result: Result<(), String>,
        host: &mut dyn GridHost,
    ) {
        let Some(request) = self.inflight.get(&id).cloned() else {
            log::debug!("completion for unknown request {:?}", id);
            return;
        };
        match result {
            Ok(()) => self.finish_request(id, host),
            Err(error) => {
                if self.settings.retry_failed_requests && self.retried.insert(id) {
                    log::warn!(
                        "request for style {:?} failed ({}), retrying once",
                        request.style(),
                        error
                    );
                    host.issue_request(id, request);
                } else {
                    log::error!("request for style {:?} failed: {}", request.style(), error);
                    self.events
                        .push(ControllerEvent::RequestFailed { request, error });
                    self.finish_request(id, host);
                }
            }
        }
    }

    fn finish_request(&mut self, id: RequestId, host: &mut dyn GridHost) {
        self.inflight.remove(&id);
        self.retried.remove(&id);
        self.refresh_batch.remove(&id);
        if self.refresh_batch.is_empty() {
            host.request_refresh();
            self.events.push(ControllerEvent::RefreshRequested);
        }
    }

    // ── Lifecycle ───────────────────────────────────────────────────

    /// The table component rebuilt its rows. Every held handle is stale:
    /// reset selection and filter, discard pending edits and pastes.
    pub fn grid_refreshed(&mut self) {
        self.selection.clear();
        self.filter = FilterState::default();
        for cell in self.sync.clear() {
            self.events.push(ControllerEvent::EditDropped { cell });
        }
        self.pending_pastes.clear();
    }

    // ── Collaborator-provided controls ──────────────────────────────

    /// Echo the encryption toggle and keep its indicator accent in sync.
    pub fn encryption_changed(&mut self, enabled: bool, host: &mut dyn GridHost) -> bool {
        host.set_control_accent(Control::EncryptionIndicator, enabled);
        enabled
    }

    /// Handle a style-file selector change. The sentinel choice prompts
    /// for a new filename; cancellation yields an empty string, which
    /// callers treat as a no-op.
    pub fn style_file_selected(
        &mut self,
        choice: &str,
        host: &mut dyn GridHost,
    ) -> (String, String) {
        if choice == CREATE_NEW_SENTINEL {
            let filename = host
                .prompt_text(PromptKind::NewStyleFile, "New style filename")
                .unwrap_or_default();
            return (filename, String::new());
        }
        (choice.to_string(), String::new())
    }
}
