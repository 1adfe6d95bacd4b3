//! Filter state for the row-filtering engine.

use serde::{Deserialize, Serialize};

/// How the filter text is matched against cell labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterMode {
    /// Case-sensitive substring containment.
    #[default]
    ExactMatch,
    /// Substring containment after lowercasing both operands.
    CaseInsensitive,
    /// Unanchored regular-expression search.
    Regex,
}

/// Current filter text and mode.
///
/// An unparsable pattern in `Regex` mode is not an error here; the engine
/// degrades to a match-nothing predicate and flags the filter control
/// invalid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterState {
    pub text: String,
    pub mode: FilterMode,
}

impl FilterState {
    pub fn new(text: impl Into<String>, mode: FilterMode) -> Self {
        Self {
            text: text.into(),
            mode,
        }
    }

    /// An empty filter text matches vacuously: every row stays visible.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}
