//! HTTP adapters - REST API implementations.

pub mod debrief;
mod router;

pub use debrief::DebriefAppState;
pub use router::build_router;
