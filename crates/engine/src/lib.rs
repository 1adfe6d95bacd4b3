//! Grid controller for a style-record table owned by an external component.
//!
//! The controller owns selection and filter state, classifies every input
//! event (pass through, grid command, or suppress), and pushes cell edits
//! across the component boundary with synthetic gestures. Everything the
//! controller cannot do itself (rendering, clipboard access, prompts,
//! network requests) goes through the [`host::GridHost`] collaborator
//! trait.

pub mod controller;
pub mod dispatch;
pub mod events;
pub mod filter;
pub mod host;
pub mod settings;
pub mod sync;

#[cfg(test)]
pub mod harness;

pub use controller::GridController;
pub use dispatch::{Dispatch, Key, KeyEvent, Modifiers, Target};
pub use events::{ControllerEvent, EventCollector};
pub use host::{Control, GridHost, PasteTicket, PromptKind, RequestId, RowMarker, StyleRequest};
pub use settings::Settings;
