// Core types shared between the grid controller and its hosts.

pub mod filter;
pub mod handle;
pub mod selection;

pub use filter::{FilterMode, FilterState};
pub use handle::{CellId, InputId, RowId};
pub use selection::SelectionSet;
