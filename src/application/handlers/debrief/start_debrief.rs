//! StartDebriefHandler - Open a new debrief session.

use std::sync::Arc;

use crate::domain::debrief::{DebriefSession, PearlsPhase};
use crate::domain::foundation::DebriefSessionId;
use crate::ports::{DebriefSessionStore, SessionStoreError};

/// Command to start a debrief.
#[derive(Debug, Clone, Default)]
pub struct StartDebriefCommand {
    /// Caller-chosen id; a random one is generated when absent.
    pub session_id: Option<DebriefSessionId>,
}

/// Result of starting a debrief.
#[derive(Debug, Clone)]
pub struct StartDebriefResult {
    pub session_id: DebriefSessionId,
    pub phase: PearlsPhase,
}

/// Error type for starting a debrief.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StartDebriefError {
    #[error("Debrief session already exists: {0}")]
    AlreadyExists(DebriefSessionId),

    #[error("Session store failed: {0}")]
    Store(SessionStoreError),
}

impl From<SessionStoreError> for StartDebriefError {
    fn from(err: SessionStoreError) -> Self {
        match err {
            SessionStoreError::AlreadyExists(id) => StartDebriefError::AlreadyExists(id),
            other => StartDebriefError::Store(other),
        }
    }
}

/// Handler for starting debriefs.
pub struct StartDebriefHandler {
    store: Arc<dyn DebriefSessionStore>,
}

impl StartDebriefHandler {
    pub fn new(store: Arc<dyn DebriefSessionStore>) -> Self {
        Self { store }
    }

    pub async fn handle(
        &self,
        cmd: StartDebriefCommand,
    ) -> Result<StartDebriefResult, StartDebriefError> {
        let session = DebriefSession::new(cmd.session_id.unwrap_or_else(DebriefSessionId::new));
        let session_id = session.id();
        let phase = session.current_phase();

        self.store.insert(session).await?;

        tracing::info!(session_id = %session_id, "Debrief session started");

        Ok(StartDebriefResult { session_id, phase })
    }
}
