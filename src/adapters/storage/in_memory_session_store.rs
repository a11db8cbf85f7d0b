//! In-Memory Debrief Session Store Adapter
//!
//! Holds debrief sessions in memory for the lifetime of the process.
//! The map lock is only held long enough to look up or insert a handle;
//! per-session work happens under the session's own mutex.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};

use crate::domain::debrief::DebriefSession;
use crate::domain::foundation::DebriefSessionId;
use crate::ports::{DebriefSessionStore, SessionHandle, SessionStoreError};

/// In-memory storage for debrief sessions
#[derive(Debug, Clone)]
pub struct InMemorySessionStore {
    sessions: Arc<RwLock<HashMap<DebriefSessionId, SessionHandle>>>,
}

impl InMemorySessionStore {
    /// Create a new in-memory store
    pub fn new() -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

impl Default for InMemorySessionStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DebriefSessionStore for InMemorySessionStore {
    async fn insert(&self, session: DebriefSession) -> Result<SessionHandle, SessionStoreError> {
        let id = session.id();
        let mut sessions = self.sessions.write().await;
        if sessions.contains_key(&id) {
            return Err(SessionStoreError::AlreadyExists(id));
        }

        let handle = Arc::new(Mutex::new(session));
        sessions.insert(id, Arc::clone(&handle));
        Ok(handle)
    }

    async fn get(&self, id: DebriefSessionId) -> Result<SessionHandle, SessionStoreError> {
        let sessions = self.sessions.read().await;
        sessions
            .get(&id)
            .cloned()
            .ok_or(SessionStoreError::NotFound(id))
    }

    async fn get_or_create(&self, id: DebriefSessionId) -> SessionHandle {
        if let Some(handle) = self.sessions.read().await.get(&id) {
            return Arc::clone(handle);
        }

        // Re-check under the write lock; another request may have created it.
        let mut sessions = self.sessions.write().await;
        Arc::clone(
            sessions
                .entry(id)
                .or_insert_with(|| Arc::new(Mutex::new(DebriefSession::new(id)))),
        )
    }

    async fn remove(&self, id: DebriefSessionId) -> Result<(), SessionStoreError> {
        self.sessions
            .write()
            .await
            .remove(&id)
            .map(|_| ())
            .ok_or(SessionStoreError::NotFound(id))
    }

    async fn count(&self) -> usize {
        self.sessions.read().await.len()
    }
}
