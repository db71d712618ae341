//! In-memory backend for the Roster record store.
//!
//! Each entity kind lives in its own lock-guarded table. Nothing is persisted;
//! the data lives exactly as long as the [`MemoryStore`] does.

mod store;
mod table;

pub use store::MemoryStore;
