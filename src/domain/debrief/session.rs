//! Debrief session entity.
//!
//! Tracks the active phase and the ordered message history of one
//! debriefing conversation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::foundation::DebriefSessionId;

use super::transition::{should_transition, PhaseTransition};
use super::{DebriefMessage, PearlsPhase};

/// State of a single debriefing conversation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DebriefSession {
    id: DebriefSessionId,
    current_phase: PearlsPhase,
    messages: Vec<DebriefMessage>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl DebriefSession {
    /// Creates a session at the first phase with an empty history.
    pub fn new(id: DebriefSessionId) -> Self {
        let now = Utc::now();
        Self {
            id,
            current_phase: PearlsPhase::Preparation,
            messages: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn id(&self) -> DebriefSessionId {
        self.id
    }

    pub fn current_phase(&self) -> PearlsPhase {
        self.current_phase
    }

    pub fn messages(&self) -> &[DebriefMessage] {
        &self.messages
    }

    pub fn message_count(&self) -> usize {
        self.messages.len()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Records a user message stamped with the current phase.
    pub fn record_user_message(&mut self, content: impl Into<String>) {
        let message = DebriefMessage::user(content, self.current_phase);
        self.push(message);
    }

    /// Records an assistant message stamped with the current phase.
    ///
    /// Must be called before [`advance_if_ready`](Self::advance_if_ready) so
    /// the reply carries the phase it was generated in.
    pub fn record_assistant_message(&mut self, content: impl Into<String>) {
        let message = DebriefMessage::assistant(content, self.current_phase);
        self.push(message);
    }

    /// Returns the most recent `size` messages, oldest first.
    pub fn context_window(&self, size: usize) -> &[DebriefMessage] {
        let start = self.messages.len().saturating_sub(size);
        &self.messages[start..]
    }

    /// Number of messages stamped with `phase`.
    pub fn messages_in_phase(&self, phase: PearlsPhase) -> usize {
        self.messages.iter().filter(|m| m.phase() == phase).count()
    }

    /// Moves to the next phase when the transition predicate holds.
    ///
    /// Returns the transition that took place, if any.
    pub fn advance_if_ready(&mut self) -> Option<PhaseTransition> {
        if !should_transition(&self.messages, self.current_phase) {
            return None;
        }

        let next = self.current_phase.next()?;
        let transition = PhaseTransition {
            from: self.current_phase,
            to: next,
        };
        self.current_phase = next;
        self.updated_at = Utc::now();
        Some(transition)
    }

    fn push(&mut self, message: DebriefMessage) {
        self.messages.push(message);
        self.updated_at = Utc::now();
    }
}
