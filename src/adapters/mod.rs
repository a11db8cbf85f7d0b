//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the application to external systems:
//! - `ai` - Completion providers (OpenAI-compatible HTTP, mock)
//! - `storage` - Debrief session stores
//! - `http` - Axum REST API

pub mod ai;
pub mod http;
pub mod storage;

pub use ai::{MockAIProvider, OpenAICompatConfig, OpenAICompatProvider};
pub use http::{build_router, DebriefAppState};
pub use storage::InMemorySessionStore;
