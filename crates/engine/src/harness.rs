//! Test harness: a fake host recording every collaborator call.
//!
//! `FakeHost` stands in for the external table component, the system
//! clipboard, the prompt dialogs, and the request transport, so controller
//! behavior can be verified without GUI or network dependencies.

use std::collections::HashMap;

use stylegrid_core::{CellId, InputId, RowId};

use crate::controller::{GridController, STYLE_NAME_COL};
use crate::host::{Control, GridHost, PasteTicket, PromptKind, RequestId, RowMarker, StyleRequest};
use crate::settings::Settings;

struct FakeRow {
    id: RowId,
    cells: Vec<Option<String>>,
}

/// In-memory host. Mutations are recorded in public fields for assertions.
pub struct FakeHost {
    next_row: u64,
    rows: Vec<FakeRow>,
    visibility: HashMap<RowId, bool>,
    markers: HashMap<RowId, RowMarker>,
    accents: HashMap<Control, bool>,
    validity: HashMap<Control, bool>,
    /// Cells that received the synthetic activate-edit gesture, in order.
    pub begun_edits: Vec<CellId>,
    /// Values written into mounted inputs, in order.
    pub input_values: Vec<(InputId, String)>,
    /// Inputs that received the synthetic commit gesture, in order.
    pub committed: Vec<InputId>,
    /// Last text written to the clipboard.
    pub clipboard: Option<String>,
    /// Tickets of started clipboard reads, in order.
    pub clipboard_reads: Vec<PasteTicket>,
    /// Canned response for the next prompt. `None` means cancelled.
    pub prompt_response: Option<String>,
    /// Prompts shown, in order.
    pub prompts: Vec<(PromptKind, String)>,
    /// Outbound requests issued, in order. Retries appear again.
    pub requests: Vec<(RequestId, StyleRequest)>,
    /// Number of refresh requests.
    pub refreshes: usize,
}

impl FakeHost {
    pub fn new() -> Self {
        Self {
            next_row: 0,
            rows: Vec::new(),
            visibility: HashMap::new(),
            markers: HashMap::new(),
            accents: HashMap::new(),
            validity: HashMap::new(),
            begun_edits: Vec::new(),
            input_values: Vec::new(),
            committed: Vec::new(),
            clipboard: None,
            clipboard_reads: Vec::new(),
            prompt_response: None,
            prompts: Vec::new(),
            requests: Vec::new(),
            refreshes: 0,
        }
    }

    /// Append a row where every cell has a label.
    pub fn push_row(&mut self, labels: &[&str]) -> RowId {
        self.push_row_cells(labels.iter().map(|l| Some(l.to_string())).collect())
    }

    /// Append a row with explicit per-cell labels (`None` = no label).
    pub fn push_row_cells(&mut self, cells: Vec<Option<String>>) -> RowId {
        let id = RowId::from_raw(self.next_row);
        self.next_row += 1;
        self.rows.push(FakeRow { id, cells });
        id
    }

    /// Rows default to visible until the filter engine says otherwise.
    pub fn is_visible(&self, row: RowId) -> bool {
        self.visibility.get(&row).copied().unwrap_or(true)
    }

    pub fn marker(&self, row: RowId) -> RowMarker {
        self.markers.get(&row).copied().unwrap_or(RowMarker::Neutral)
    }

    pub fn is_accented(&self, control: Control) -> bool {
        self.accents.get(&control).copied().unwrap_or(false)
    }

    pub fn is_valid(&self, control: Control) -> bool {
        self.validity.get(&control).copied().unwrap_or(true)
    }
}

impl Default for FakeHost {
    fn default() -> Self {
        Self::new()
    }
}

impl GridHost for FakeHost {
    fn rows(&self) -> Vec<RowId> {
        self.rows.iter().map(|r| r.id).collect()
    }

    fn row_labels(&self, row: RowId) -> Vec<String> {
        self.rows
            .iter()
            .find(|r| r.id == row)
            .map(|r| r.cells.iter().flatten().cloned().collect())
            .unwrap_or_default()
    }

    fn cell_label(&self, cell: CellId) -> Option<String> {
        self.rows
            .iter()
            .find(|r| r.id == cell.row)
            .and_then(|r| r.cells.get(cell.col).cloned().flatten())
    }

    fn set_row_visible(&mut self, row: RowId, visible: bool) {
        self.visibility.insert(row, visible);
    }

    fn set_row_marker(&mut self, row: RowId, marker: RowMarker) {
        self.markers.insert(row, marker);
    }

    fn set_control_accent(&mut self, control: Control, on: bool) {
        self.accents.insert(control, on);
    }

    fn set_control_valid(&mut self, control: Control, valid: bool) {
        self.validity.insert(control, valid);
    }

    fn begin_edit(&mut self, cell: CellId) {
        self.begun_edits.push(cell);
    }

    fn set_input_value(&mut self, input: InputId, text: &str) {
        self.input_values.push((input, text.to_string()));
    }

    fn commit_input(&mut self, input: InputId) {
        self.committed.push(input);
    }

    fn clipboard_write(&mut self, text: &str) {
        self.clipboard = Some(text.to_string());
    }

    fn clipboard_read(&mut self, ticket: PasteTicket) {
        self.clipboard_reads.push(ticket);
    }

    fn prompt_text(&mut self, kind: PromptKind, message: &str) -> Option<String> {
        self.prompts.push((kind, message.to_string()));
        self.prompt_response.clone()
    }

    fn issue_request(&mut self, id: RequestId, request: StyleRequest) {
        self.requests.push((id, request));
    }

    fn request_refresh(&mut self) {
        self.refreshes += 1;
    }
}

/// Controller plus fake host, pre-seeded with a header row and one row per
/// style (index, name, prompt columns; the name cell is column 1).
pub struct GridHarness {
    pub controller: GridController,
    pub host: FakeHost,
    pub style_rows: Vec<RowId>,
}

impl GridHarness {
    pub fn with_styles(styles: &[&str]) -> Self {
        let mut host = FakeHost::new();
        host.push_row(&["", "name", "prompt"]);

        let mut style_rows = Vec::new();
        for (i, &style) in styles.iter().enumerate() {
            let index = i.to_string();
            let prompt = format!("a photo in {style} style");
            style_rows.push(host.push_row(&[&index, style, &prompt]));
        }

        Self {
            controller: GridController::new(Settings::default()),
            host,
            style_rows,
        }
    }

    /// The style-name cell of the nth style row.
    pub fn name_cell(&self, idx: usize) -> CellId {
        CellId::new(self.style_rows[idx], STYLE_NAME_COL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fake_host_defaults() {
        let mut host = FakeHost::new();
        let row = host.push_row(&["0", "red"]);

        assert!(host.is_visible(row));
        assert_eq!(host.marker(row), RowMarker::Neutral);
        assert!(host.is_valid(Control::FilterText));
        assert!(!host.is_accented(Control::FilterHeader));
        assert_eq!(host.row_labels(row), vec!["0", "red"]);
        assert_eq!(
            host.cell_label(CellId::new(row, 1)).as_deref(),
            Some("red")
        );
        assert_eq!(host.cell_label(CellId::new(row, 9)), None);
    }
}
