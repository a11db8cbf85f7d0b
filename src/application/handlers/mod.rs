//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations.

pub mod debrief;

pub use debrief::{
    EndDebriefCommand, EndDebriefError, EndDebriefHandler, EndDebriefResult, GetDebriefError,
    GetDebriefHandler, GetDebriefQuery, ProcessInputCommand, ProcessInputError,
    ProcessInputHandler, ProcessInputResult, StartDebriefCommand, StartDebriefError,
    StartDebriefHandler, StartDebriefResult,
};
