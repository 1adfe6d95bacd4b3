//! The collaborator boundary between the controller and the embedding app.
//!
//! The external table component owns every row, cell, and edit input. The
//! controller can only observe labels and issue requests: toggle visibility,
//! apply markers, dispatch synthetic gestures, read/write the clipboard,
//! prompt the user, and send service requests. Hosts deliver the
//! asynchronous halves back to the controller (`edit_mounted`,
//! `paste_resolved`, `request_completed`, `grid_refreshed`).

use stylegrid_core::{CellId, InputId, RowId};

/// Visual marker token for a row. Clearing a selection resets rows to
/// `Neutral` rather than restoring a snapshot of prior styling, so stale
/// row handles can never leak old inline state back onto recreated rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RowMarker {
    Neutral,
    Selected,
}

/// Host-owned UI controls the controller can accent or invalidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Control {
    /// The filter text input. Flagged invalid on an unparsable pattern.
    FilterText,
    /// The collapsible header around the filter controls. Accented while a
    /// filter is active.
    FilterHeader,
    /// The encryption indicator. Accented while encryption is enabled.
    EncryptionIndicator,
}

/// What a blocking text prompt is asking for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptKind {
    /// Destination prefix for a move command.
    MoveDestination,
    /// Filename for a newly created style file.
    NewStyleFile,
}

/// Ticket correlating an asynchronous clipboard read with its paste target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PasteTicket(pub u64);

/// Identifier for an outbound service request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RequestId(pub u64);

/// Outbound request payloads. The wire encoding is the host's concern;
/// `stylegrid-client` provides the reference transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StyleRequest {
    Delete { style: String },
    Move { style: String, new_prefix: String },
}

impl StyleRequest {
    /// The style name this request operates on.
    pub fn style(&self) -> &str {
        match self {
            StyleRequest::Delete { style } => style,
            StyleRequest::Move { style, .. } => style,
        }
    }
}

/// Everything the embedding application provides to the controller.
pub trait GridHost {
    /// Rows in display order. The first row is the header row.
    fn rows(&self) -> Vec<RowId>;

    /// All label texts present on a row, in column order. Cells without a
    /// label contribute nothing.
    fn row_labels(&self, row: RowId) -> Vec<String>;

    /// Label text of one cell, or `None` if the cell has no label.
    fn cell_label(&self, cell: CellId) -> Option<String>;

    /// Toggle a row's visibility. A display toggle, never removal: row
    /// order and identity are preserved.
    fn set_row_visible(&mut self, row: RowId, visible: bool);

    /// Apply a marker token to a row.
    fn set_row_marker(&mut self, row: RowId, marker: RowMarker);

    /// Accent a control (active filter, encryption on).
    fn set_control_accent(&mut self, control: Control, on: bool);

    /// Mark a control valid or invalid (unparsable filter pattern).
    fn set_control_valid(&mut self, control: Control, valid: bool);

    /// Dispatch the synthetic activate-edit gesture at a cell. The edit
    /// input mounts asynchronously; the host must call
    /// [`GridController::edit_mounted`](crate::GridController::edit_mounted)
    /// once it exists.
    fn begin_edit(&mut self, cell: CellId);

    /// Set the value of a mounted edit input.
    fn set_input_value(&mut self, input: InputId, text: &str);

    /// Dispatch the synthetic commit gesture on a mounted input, causing
    /// the table component to accept the value and persist it through its
    /// own channel.
    fn commit_input(&mut self, input: InputId);

    /// Write text to the system clipboard.
    fn clipboard_write(&mut self, text: &str);

    /// Begin an asynchronous clipboard read. The host resolves it by
    /// calling
    /// [`GridController::paste_resolved`](crate::GridController::paste_resolved)
    /// with the same ticket; a read that never completes simply never
    /// applies.
    fn clipboard_read(&mut self, ticket: PasteTicket);

    /// Blocking, cancellable text prompt. `None` means cancelled.
    fn prompt_text(&mut self, kind: PromptKind, message: &str) -> Option<String>;

    /// Issue an outbound service request without blocking. The completion
    /// arrives via
    /// [`GridController::request_completed`](crate::GridController::request_completed).
    fn issue_request(&mut self, id: RequestId, request: StyleRequest);

    /// Ask the table component to re-fetch and re-render its data. The
    /// host calls
    /// [`GridController::grid_refreshed`](crate::GridController::grid_refreshed)
    /// once the rows have been rebuilt.
    fn request_refresh(&mut self);
}
