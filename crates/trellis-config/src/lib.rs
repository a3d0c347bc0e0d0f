//! Trellis Config
//!
//! This crate contains the serializable types that cross the boundary between
//! the UI layer and the board. They describe entities and commands before the
//! board applies them to its workflow state.
//!
//! Definitions can come from:
//! - JSON files (entity lists loaded by an `EntitySource`)
//! - Command scripts (a JSON array, or one JSON command per line)
//!
//! The board takes these types, validates them, and turns them into actions,
//! triggers and connections.

mod command;
mod entity;
mod error;

pub use command::{Command, parse_script};
pub use entity::{ConnectionDef, EntityDef, EntityKind, Id};
pub use error::ConfigError;
