//! Domain layer - Pure business logic.
//!
//! No infrastructure dependencies. The debrief module is the core of the
//! application; foundation holds the shared identifiers and errors.

pub mod debrief;
pub mod foundation;
