//! Trellis Source
//!
//! Where the initial actions and triggers come from: the [`EntitySource`]
//! trait plus a filesystem source and an in-memory demo source.

mod error;
mod fs_source;
mod source;
mod static_source;

pub use error::SourceError;
pub use fs_source::FsEntitySource;
pub use source::EntitySource;
pub use static_source::StaticEntitySource;
