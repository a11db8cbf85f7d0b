//! HTTP adapters for debriefing
//!
//! Exposes REST API endpoints for PEARLS debrief sessions.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use dto::*;
pub use handlers::DebriefAppState;
pub use routes::routes;
