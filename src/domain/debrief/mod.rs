//! Debrief domain - the PEARLS phase registry and session state.
//!
//! ## Components
//!
//! - `PearlsPhase` - closed set of phases with prompt, successor and threshold lookups
//! - `DebriefSession` - current phase plus ordered message history
//! - `UserInput` - non-blank text submitted by the user
//! - `should_transition` - the rule deciding when a phase is complete

mod input;
mod message;
mod phase;
mod session;
mod transition;

pub use input::UserInput;
pub use message::{DebriefMessage, MessageRole};
pub use phase::PearlsPhase;
pub use session::DebriefSession;
pub use transition::{should_transition, PhaseTransition};
