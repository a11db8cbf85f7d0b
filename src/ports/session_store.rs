//! Session Store Port - Interface for holding debrief sessions.
//!
//! Sessions are keyed by [`DebriefSessionId`]. Each stored session sits
//! behind its own async mutex: a caller locks the handle for the whole
//! read-modify-write of one input, so writes to a given session are
//! serialized while different sessions proceed independently.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::domain::debrief::DebriefSession;
use crate::domain::foundation::DebriefSessionId;

/// Shared, lockable handle to a stored session.
pub type SessionHandle = Arc<Mutex<DebriefSession>>;

/// Errors that can occur during session store operations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionStoreError {
    #[error("Debrief session not found: {0}")]
    NotFound(DebriefSessionId),

    #[error("Debrief session already exists: {0}")]
    AlreadyExists(DebriefSessionId),
}

/// Port for storing and retrieving debrief sessions
#[async_trait]
pub trait DebriefSessionStore: Send + Sync {
    /// Insert a new session
    ///
    /// # Errors
    /// Returns `SessionStoreError::AlreadyExists` if the id is taken
    async fn insert(&self, session: DebriefSession) -> Result<SessionHandle, SessionStoreError>;

    /// Get the handle for an existing session
    ///
    /// # Errors
    /// Returns `SessionStoreError::NotFound` if no session exists
    async fn get(&self, id: DebriefSessionId) -> Result<SessionHandle, SessionStoreError>;

    /// Get the handle for a session, creating a fresh one if absent
    async fn get_or_create(&self, id: DebriefSessionId) -> SessionHandle;

    /// Remove a session
    ///
    /// # Errors
    /// Returns `SessionStoreError::NotFound` if no session exists
    async fn remove(&self, id: DebriefSessionId) -> Result<(), SessionStoreError>;

    /// Number of sessions currently held
    async fn count(&self) -> usize;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_error_names_session() {
        let id = DebriefSessionId::new();
        let err = SessionStoreError::NotFound(id);
        assert!(err.to_string().contains(&id.to_string()));
    }
}
