//! Storage backends for collection persistence.
//!
//! A store persists each collection as a whole document list. The engine
//! reads a collection once at first use and rewrites the full list on every
//! committed mutation.
//!
//! Two backends are provided: [FileStore] keeps one JSON file per collection
//! under a configurable root directory, and [MemoryStore] keeps everything in
//! memory for tests and ephemeral databases.

mod file_store;
mod memory_store;
mod store;

pub use file_store::*;
pub use memory_store::*;
pub use store::*;
