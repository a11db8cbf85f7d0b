//! Phase transition predicate.

use serde::Serialize;

use super::{DebriefMessage, PearlsPhase};

/// Decides whether the session should leave `current_phase`.
///
/// Counts every message stamped with `current_phase`, regardless of role, and
/// compares it to the phase threshold. The terminal phase never transitions.
pub fn should_transition(messages: &[DebriefMessage], current_phase: PearlsPhase) -> bool {
    if current_phase.is_terminal() {
        return false;
    }

    let count = messages
        .iter()
        .filter(|m| m.phase() == current_phase)
        .count();

    count >= current_phase.min_messages()
}

/// A phase change that occurred while processing an input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PhaseTransition {
    pub from: PearlsPhase,
    pub to: PearlsPhase,
}

impl PhaseTransition {
    /// Human-readable notice appended to the reply that triggered the change.
    pub fn notice(&self) -> String {
        format!(
            "\n\nWe're now moving to the {} phase of our debriefing.",
            self.to.label()
        )
    }
}
