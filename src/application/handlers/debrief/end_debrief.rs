//! EndDebriefHandler - Close a debrief session and discard its history.

use std::sync::Arc;

use crate::domain::debrief::PearlsPhase;
use crate::domain::foundation::DebriefSessionId;
use crate::ports::{DebriefSessionStore, SessionStoreError};

/// Command to end a debrief.
#[derive(Debug, Clone)]
pub struct EndDebriefCommand {
    pub session_id: DebriefSessionId,
}

/// Result of ending a debrief.
#[derive(Debug, Clone)]
pub struct EndDebriefResult {
    pub session_id: DebriefSessionId,
    pub final_phase: PearlsPhase,
    pub message_count: usize,
    /// True when the session had reached the terminal phase.
    pub completed: bool,
}

/// Error type for ending a debrief.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EndDebriefError {
    #[error("Debrief session not found: {0}")]
    NotFound(DebriefSessionId),

    #[error("Session store failed: {0}")]
    Store(SessionStoreError),
}

impl From<SessionStoreError> for EndDebriefError {
    fn from(err: SessionStoreError) -> Self {
        match err {
            SessionStoreError::NotFound(id) => EndDebriefError::NotFound(id),
            other => EndDebriefError::Store(other),
        }
    }
}

/// Handler for ending debriefs.
pub struct EndDebriefHandler {
    store: Arc<dyn DebriefSessionStore>,
}

impl EndDebriefHandler {
    pub fn new(store: Arc<dyn DebriefSessionStore>) -> Self {
        Self { store }
    }

    pub async fn handle(&self, cmd: EndDebriefCommand) -> Result<EndDebriefResult, EndDebriefError> {
        let handle = self.store.get(cmd.session_id).await?;

        // Hold the session lock so an in-flight input completes first.
        let session = handle.lock().await;
        self.store.remove(cmd.session_id).await?;

        let final_phase = session.current_phase();
        let result = EndDebriefResult {
            session_id: cmd.session_id,
            final_phase,
            message_count: session.message_count(),
            completed: final_phase.is_terminal(),
        };

        tracing::info!(
            session_id = %cmd.session_id,
            final_phase = %final_phase,
            messages = result.message_count,
            "Debrief session ended"
        );

        Ok(result)
    }
}
