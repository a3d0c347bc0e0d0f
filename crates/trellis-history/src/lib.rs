//! Trellis History
//!
//! Snapshot-based undo/redo. [`History`] owns a current value together with
//! full copies of every earlier (`past`) and undone (`future`) value.
//!
//! - [`History::record`] applies an edit and pushes the previous value
//! - [`History::undo`] / [`History::redo`] swap snapshots between the stacks
//! - [`History::reset`] edits the current value without recording it
//!
//! Snapshots are owned values. Nothing in `past` or `future` is shared with
//! the current value, so later edits can never reach a stored snapshot.

mod history;

pub use history::{History, HistoryConfig};
