//! Storage Adapters
//!
//! Implementations of the DebriefSessionStore port.
//!
//! - **InMemorySessionStore** - Holds sessions in memory; nothing survives a restart

mod in_memory_session_store;

pub use in_memory_session_store::InMemorySessionStore;
