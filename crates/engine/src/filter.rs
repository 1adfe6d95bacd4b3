//! Row filter engine.
//!
//! Evaluates one predicate per row against every cell label and toggles row
//! visibility on the host. Rows are never removed: order and identity are
//! preserved, and the header row (first in display order) stays visible no
//! matter what.
//!
//! An unparsable pattern in regex mode is recovered locally: the engine
//! degrades to a match-nothing predicate and flags the filter control
//! invalid. It never surfaces an error to the caller; a broken pattern
//! must not take the grid down with it.

use regex::Regex;
use stylegrid_core::{FilterMode, FilterState};

use crate::host::{Control, GridHost};

/// Outcome of one filter pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterOutcome {
    /// Non-header rows left visible.
    pub visible: usize,
    /// True when the pattern failed to compile.
    pub invalid_pattern: bool,
}

/// Compiled form of a filter state.
enum Predicate {
    /// Empty filter text: vacuous match, every row visible.
    All,
    Exact(String),
    CaseInsensitive(String),
    Pattern(Regex),
    /// Regex compile failure fallback.
    Nothing,
}

impl Predicate {
    fn compile(state: &FilterState) -> (Self, bool) {
        if state.is_empty() {
            return (Predicate::All, false);
        }
        match state.mode {
            FilterMode::ExactMatch => (Predicate::Exact(state.text.clone()), false),
            FilterMode::CaseInsensitive => {
                (Predicate::CaseInsensitive(state.text.to_lowercase()), false)
            }
            FilterMode::Regex => match Regex::new(&state.text) {
                Ok(re) => (Predicate::Pattern(re), false),
                Err(err) => {
                    log::warn!("invalid filter pattern {:?}: {}", state.text, err);
                    (Predicate::Nothing, true)
                }
            },
        }
    }

    fn matches(&self, label: &str) -> bool {
        match self {
            Predicate::All => true,
            Predicate::Exact(needle) => label.contains(needle),
            Predicate::CaseInsensitive(needle) => label.to_lowercase().contains(needle),
            Predicate::Pattern(re) => re.is_match(label),
            Predicate::Nothing => false,
        }
    }
}

/// Apply a filter state to every row on the host.
///
/// A row is visible iff any of its cell labels satisfies the predicate, or
/// the filter text is empty. The header row is pinned visible. Also keeps
/// the filter control's validity flag and the filter header accent in sync.
pub fn apply_filter(state: &FilterState, host: &mut dyn GridHost) -> FilterOutcome {
    let (predicate, invalid_pattern) = Predicate::compile(state);

    let mut visible = 0;
    for (idx, row) in host.rows().into_iter().enumerate() {
        let is_header = idx == 0;
        let show = is_header
            || host
                .row_labels(row)
                .iter()
                .any(|label| predicate.matches(label));
        if show && !is_header {
            visible += 1;
        }
        host.set_row_visible(row, show);
    }

    host.set_control_valid(Control::FilterText, !invalid_pattern);
    host.set_control_accent(Control::FilterHeader, !state.is_empty());

    FilterOutcome {
        visible,
        invalid_pattern,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::harness::FakeHost;
    use stylegrid_core::FilterMode;

    fn host_with_styles(styles: &[&str]) -> FakeHost {
        let mut host = FakeHost::new();
        host.push_row(&["", "style"]); // header
        for (i, &style) in styles.iter().enumerate() {
            let index = i.to_string();
            host.push_row(&[&index, style]);
        }
        host
    }

    fn visible_styles(host: &FakeHost) -> Vec<String> {
        host.rows()
            .into_iter()
            .skip(1)
            .filter(|&r| host.is_visible(r))
            .map(|r| host.row_labels(r)[1].clone())
            .collect()
    }

    #[test]
    fn test_empty_text_shows_all_rows_in_every_mode() {
        for mode in [
            FilterMode::ExactMatch,
            FilterMode::CaseInsensitive,
            FilterMode::Regex,
        ] {
            let mut host = host_with_styles(&["red", "green", "blue"]);
            let outcome = apply_filter(&FilterState::new("", mode), &mut host);

            assert_eq!(outcome.visible, 3);
            assert!(!outcome.invalid_pattern);
            let header = host.rows()[0];
            assert!(host.is_visible(header), "header must stay visible");
            assert_eq!(visible_styles(&host).len(), 3);
        }
    }

    #[test]
    fn test_exact_match_is_case_sensitive() {
        let mut host = host_with_styles(&["Red", "red", "rose-red"]);
        let state = FilterState::new("red", FilterMode::ExactMatch);
        let outcome = apply_filter(&state, &mut host);

        assert_eq!(outcome.visible, 2);
        assert_eq!(visible_styles(&host), vec!["red", "rose-red"]);
    }

    #[test]
    fn test_case_insensitive_is_case_agnostic() {
        let mut upper = host_with_styles(&["Red", "green", "DARK-RED"]);
        let mut lower = host_with_styles(&["Red", "green", "DARK-RED"]);

        apply_filter(&FilterState::new("RED", FilterMode::CaseInsensitive), &mut upper);
        apply_filter(&FilterState::new("red", FilterMode::CaseInsensitive), &mut lower);

        assert_eq!(visible_styles(&upper), visible_styles(&lower));
        assert_eq!(visible_styles(&upper), vec!["Red", "DARK-RED"]);
    }

    #[test]
    fn test_regex_mode_searches_unanchored() {
        let mut host = host_with_styles(&["anime-1", "anime-22", "photo"]);
        let state = FilterState::new(r"anime-\d+", FilterMode::Regex);
        let outcome = apply_filter(&state, &mut host);

        assert!(!outcome.invalid_pattern);
        assert_eq!(visible_styles(&host), vec!["anime-1", "anime-22"]);
        assert!(host.is_valid(Control::FilterText));
    }

    #[test]
    fn test_invalid_regex_matches_nothing_and_flags_control() {
        let mut host = host_with_styles(&["red", "green"]);
        let state = FilterState::new("(unclosed", FilterMode::Regex);
        let outcome = apply_filter(&state, &mut host);

        assert!(outcome.invalid_pattern);
        assert_eq!(outcome.visible, 0);
        let header = host.rows()[0];
        assert!(host.is_visible(header), "header survives an invalid pattern");
        assert!(visible_styles(&host).is_empty());
        assert!(!host.is_valid(Control::FilterText));

        // A subsequent valid pattern restores matching and clears the mark.
        let outcome = apply_filter(&FilterState::new("red", FilterMode::Regex), &mut host);
        assert!(!outcome.invalid_pattern);
        assert_eq!(visible_styles(&host), vec!["red"]);
        assert!(host.is_valid(Control::FilterText));
    }

    #[test]
    fn test_filter_header_accent_tracks_active_filter() {
        let mut host = host_with_styles(&["red"]);

        apply_filter(&FilterState::new("r", FilterMode::ExactMatch), &mut host);
        assert!(host.is_accented(Control::FilterHeader));

        apply_filter(&FilterState::new("", FilterMode::ExactMatch), &mut host);
        assert!(!host.is_accented(Control::FilterHeader));
    }

    #[test]
    fn test_any_cell_label_can_match() {
        // Match on the index column, not the style name.
        let mut host = FakeHost::new();
        host.push_row(&["", "style"]);
        host.push_row(&["42", "red"]);
        host.push_row(&["7", "green"]);

        apply_filter(&FilterState::new("42", FilterMode::ExactMatch), &mut host);
        assert_eq!(visible_styles(&host), vec!["red"]);
    }
}
