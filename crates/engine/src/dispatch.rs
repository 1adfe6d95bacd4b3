//! Input event model for the command dispatcher.
//!
//! The host translates its native keyboard/mouse events into these types and
//! calls the controller in capture order, before any other handler. The
//! controller answers with a [`Dispatch`] verdict: `PassThrough` means the
//! event continues untouched; `Handled` means the host must stop propagation
//! so the chord cannot leak into the page's own shortcut handling.

use stylegrid_core::{CellId, InputId};

/// Verdict for one input event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    /// Let the event reach the table component's native handling.
    PassThrough,
    /// Consumed by the grid; the host must suppress further propagation.
    Handled,
}

/// Keyboard key, reduced to what the dispatcher distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Char(char),
    Backspace,
    Delete,
    Enter,
    Escape,
    /// Anything else (arrows, function keys, ...).
    Other,
}

/// Modifier state accompanying an event.
///
/// `primary` is the platform's primary command modifier (ctrl, or cmd on
/// macOS) and doubles as the multi-select modifier for click and context
/// gestures. `shift` is the distinct "allow native menu" modifier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub primary: bool,
    pub shift: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers {
        primary: false,
        shift: false,
    };

    pub fn primary() -> Self {
        Modifiers {
            primary: true,
            ..Self::NONE
        }
    }

    pub fn shift() -> Self {
        Modifiers {
            shift: true,
            ..Self::NONE
        }
    }
}

/// What the event landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    /// The edit input mounted inside an editing cell.
    Input(InputId),
    /// A cell currently in editing state (it contains a mounted input).
    EditingCell(CellId),
    /// A cell in display state.
    Cell(CellId),
    /// Empty grid area: no row under the pointer/focus.
    Grid,
}

impl Target {
    /// True when native text editing owns this target: unmodified keys must
    /// pass through untouched.
    pub fn is_editing(&self) -> bool {
        matches!(self, Target::Input(_) | Target::EditingCell(_))
    }

    /// The display-state cell under the event, if any. Editing cells do not
    /// count: selection gestures only act on display-state rows.
    pub fn cell(&self) -> Option<CellId> {
        match self {
            Target::Cell(cell) => Some(*cell),
            _ => None,
        }
    }
}

/// One keyboard event as seen by the dispatcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    pub key: Key,
    pub modifiers: Modifiers,
    pub target: Target,
}

impl KeyEvent {
    pub fn new(key: Key, modifiers: Modifiers, target: Target) -> Self {
        Self {
            key,
            modifiers,
            target,
        }
    }

    /// Primary-modifier chord letter, if this event is one.
    pub fn chord_char(&self) -> Option<char> {
        if !self.modifiers.primary {
            return None;
        }
        match self.key {
            Key::Char(c) => Some(c.to_ascii_lowercase()),
            _ => None,
        }
    }
}
