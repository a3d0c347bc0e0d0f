//! Trellis Board
//!
//! This crate provides the [`Board`]: the one object that owns a workflow's
//! state, its undo history and the load state of its entity lists. UI code
//! holds a handle to a board and talks to it only through its commands.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                          Board                              │
//! │  - add/remove entity, connect/disconnect, undo/redo         │
//! │  - set_actions/set_triggers (loads, not undoable)           │
//! │  - fetch states, layout, snapshot, notifications            │
//! └─────────────────────────────────────────────────────────────┘
//!                               │
//!                               ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                  History<WorkflowState>                     │
//! │  - current + past/future snapshots                          │
//! └─────────────────────────────────────────────────────────────┘
//!                               │
//!                               ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     WorkflowState                           │
//! │  - action and trigger maps, one-to-one pairing              │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Usage
//!
//! ```ignore
//! use trellis_board::{Board, load};
//! use trellis_source::StaticEntitySource;
//!
//! let mut board = Board::new();
//! load(&mut board, &StaticEntitySource::sample()).await;
//!
//! board.connect("doSomething", "onSomething");
//! board.undo();
//! ```

mod board;
mod events;
mod fetch;
mod loader;

pub use board::{Board, BoardSnapshot};
pub use events::{BoardEvent, BoardNotifier, ChannelNotifier, NoopNotifier};
pub use fetch::{BoardStatus, FetchState};
pub use loader::{LoadReport, load};
