//! Messages recorded in a debrief session.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::PearlsPhase;

/// Who produced a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    System,
    User,
    Assistant,
}

/// A single message in the debrief history.
///
/// Each message is stamped with the phase that was active when it was
/// produced. Messages are never edited after they are recorded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DebriefMessage {
    role: MessageRole,
    content: String,
    phase: PearlsPhase,
    created_at: DateTime<Utc>,
}

impl DebriefMessage {
    /// Creates a new message stamped with `phase`.
    pub fn new(role: MessageRole, content: impl Into<String>, phase: PearlsPhase) -> Self {
        Self {
            role,
            content: content.into(),
            phase,
            created_at: Utc::now(),
        }
    }

    /// Creates a user message.
    pub fn user(content: impl Into<String>, phase: PearlsPhase) -> Self {
        Self::new(MessageRole::User, content, phase)
    }

    /// Creates an assistant message.
    pub fn assistant(content: impl Into<String>, phase: PearlsPhase) -> Self {
        Self::new(MessageRole::Assistant, content, phase)
    }

    pub fn role(&self) -> MessageRole {
        self.role
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn phase(&self) -> PearlsPhase {
        self.phase
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
