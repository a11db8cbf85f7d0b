//! GetDebriefHandler - Query handler for a session snapshot.

use std::sync::Arc;

use crate::domain::debrief::DebriefSession;
use crate::domain::foundation::DebriefSessionId;
use crate::ports::{DebriefSessionStore, SessionStoreError};

/// Query for a debrief session.
#[derive(Debug, Clone)]
pub struct GetDebriefQuery {
    pub session_id: DebriefSessionId,
}

/// Error type for debrief lookup.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GetDebriefError {
    #[error("Debrief session not found: {0}")]
    NotFound(DebriefSessionId),

    #[error("Session store failed: {0}")]
    Store(SessionStoreError),
}

impl From<SessionStoreError> for GetDebriefError {
    fn from(err: SessionStoreError) -> Self {
        match err {
            SessionStoreError::NotFound(id) => GetDebriefError::NotFound(id),
            other => GetDebriefError::Store(other),
        }
    }
}

/// Handler returning a copy of the session state.
///
/// Waits for any in-flight input on the session to finish, so the snapshot
/// never shows a user message without its reply mid-update.
pub struct GetDebriefHandler {
    store: Arc<dyn DebriefSessionStore>,
}

impl GetDebriefHandler {
    pub fn new(store: Arc<dyn DebriefSessionStore>) -> Self {
        Self { store }
    }

    pub async fn handle(&self, query: GetDebriefQuery) -> Result<DebriefSession, GetDebriefError> {
        let handle = self.store.get(query.session_id).await?;
        let session = handle.lock().await.clone();
        Ok(session)
    }
}
