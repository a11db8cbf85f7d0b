//! Debrief handlers.
//!
//! - `ProcessInputHandler` - reply to user input and advance the PEARLS phase
//! - `StartDebriefHandler` - open a session
//! - `GetDebriefHandler` - read a session snapshot
//! - `EndDebriefHandler` - close a session

mod end_debrief;
mod get_debrief;
mod process_input;
mod start_debrief;

pub use end_debrief::{EndDebriefCommand, EndDebriefError, EndDebriefHandler, EndDebriefResult};
pub use get_debrief::{GetDebriefError, GetDebriefHandler, GetDebriefQuery};
pub use process_input::{
    ProcessInputCommand, ProcessInputError, ProcessInputHandler, ProcessInputResult,
};
pub use start_debrief::{
    StartDebriefCommand, StartDebriefError, StartDebriefHandler, StartDebriefResult,
};
