//! ProcessInputHandler - Generate a reply to user input and advance the phase.
//!
//! The session handle is locked for the entire operation, so inputs against
//! one session are applied strictly one after another. A handle that was
//! removed from the store while the input waited for its lock is never
//! written to.

use std::sync::Arc;

use tokio::sync::OwnedMutexGuard;
use uuid::Uuid;

use crate::config::DebriefConfig;
use crate::domain::debrief::{
    DebriefSession, MessageRole, PearlsPhase, PhaseTransition, UserInput,
};
use crate::domain::foundation::DebriefSessionId;
use crate::ports::{
    AIError, AIProvider, CompletionRequest, DebriefSessionStore, MessageRole as AIMessageRole,
    RequestMetadata, SessionStoreError,
};

/// Longest input prefix written to logs.
const LOG_INPUT_CHARS: usize = 80;

/// Command to process one user input.
#[derive(Debug, Clone)]
pub struct ProcessInputCommand {
    pub session_id: DebriefSessionId,
    pub text: String,
    /// Start a fresh session when `session_id` is unknown.
    pub create_if_missing: bool,
}

impl ProcessInputCommand {
    /// Input for an existing session.
    pub fn new(session_id: DebriefSessionId, text: impl Into<String>) -> Self {
        Self {
            session_id,
            text: text.into(),
            create_if_missing: false,
        }
    }

    /// Input that starts the session on first use.
    pub fn creating_if_missing(mut self) -> Self {
        self.create_if_missing = true;
        self
    }
}

/// Result of processing an input.
#[derive(Debug, Clone)]
pub struct ProcessInputResult {
    pub session_id: DebriefSessionId,
    /// Reply exactly as the provider returned it (the stored form).
    pub reply: String,
    /// Reply plus the transition notice, if a transition happened.
    pub response_text: String,
    pub phase_before: PearlsPhase,
    pub phase_after: PearlsPhase,
    pub transition: Option<PhaseTransition>,
}

/// Error type for processing input.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ProcessInputError {
    #[error("Debrief session not found: {0}")]
    SessionNotFound(DebriefSessionId),

    #[error("Input text must not be empty")]
    EmptyInput,

    #[error("Completion provider failed: {0}")]
    Upstream(AIError),

    #[error("Completion provider returned a malformed response: {0}")]
    MalformedResponse(String),

    #[error("Session store failed: {0}")]
    Store(SessionStoreError),
}

impl From<AIError> for ProcessInputError {
    fn from(err: AIError) -> Self {
        match err {
            AIError::MalformedResponse(reason) => ProcessInputError::MalformedResponse(reason),
            other => ProcessInputError::Upstream(other),
        }
    }
}

impl From<SessionStoreError> for ProcessInputError {
    fn from(err: SessionStoreError) -> Self {
        match err {
            SessionStoreError::NotFound(id) => ProcessInputError::SessionNotFound(id),
            other => ProcessInputError::Store(other),
        }
    }
}

/// Handler for user input in a debrief session.
pub struct ProcessInputHandler<P: ?Sized + AIProvider> {
    store: Arc<dyn DebriefSessionStore>,
    ai_provider: Arc<P>,
    config: DebriefConfig,
}

impl<P: ?Sized + AIProvider> ProcessInputHandler<P> {
    pub fn new(
        store: Arc<dyn DebriefSessionStore>,
        ai_provider: Arc<P>,
        config: DebriefConfig,
    ) -> Self {
        Self {
            store,
            ai_provider,
            config,
        }
    }

    pub async fn handle(
        &self,
        cmd: ProcessInputCommand,
    ) -> Result<ProcessInputResult, ProcessInputError> {
        let input = truncate_for_log(&cmd.text);

        let text = UserInput::try_new(cmd.text).map_err(|e| {
            tracing::warn!(session_id = %cmd.session_id, error = %e, "Rejected debrief input");
            ProcessInputError::EmptyInput
        })?;

        // 1. Resolve the session and take its writer lock
        let mut session = self
            .lock_live_session(cmd.session_id, cmd.create_if_missing)
            .await?;
        let phase_before = session.current_phase();

        tracing::info!(
            session_id = %cmd.session_id,
            phase = %phase_before,
            input = %input,
            "Processing debrief input"
        );

        // 2. Record the user message under the current phase
        session.record_user_message(text.into_inner());

        // 3. Ask the provider for a reply
        let request = self.build_request(&session);
        let reply = match self.ai_provider.complete(request).await {
            Ok(response) => response.content,
            Err(err) => {
                tracing::error!(
                    session_id = %cmd.session_id,
                    phase = %phase_before,
                    input = %input,
                    status = ?err.status(),
                    error = %err,
                    "Completion request failed"
                );
                return Err(err.into());
            }
        };

        // 4. Record the reply under the pre-transition phase
        session.record_assistant_message(reply.clone());

        // 5. Advance when the phase has enough messages
        let transition = session.advance_if_ready();
        let phase_after = session.current_phase();

        let response_text = match transition {
            Some(t) => {
                tracing::info!(
                    session_id = %cmd.session_id,
                    from = %t.from,
                    to = %t.to,
                    "Debrief phase advanced"
                );
                format!("{}{}", reply, t.notice())
            }
            None => reply.clone(),
        };

        Ok(ProcessInputResult {
            session_id: cmd.session_id,
            reply,
            response_text,
            phase_before,
            phase_after,
            transition,
        })
    }

    /// Locks the session the store currently holds under `id`.
    ///
    /// A handle ended while this call waited for its lock is detached from the
    /// store; such a handle is dropped and the lookup is retried (or reported
    /// missing when creation is not allowed).
    async fn lock_live_session(
        &self,
        id: DebriefSessionId,
        create_if_missing: bool,
    ) -> Result<OwnedMutexGuard<DebriefSession>, ProcessInputError> {
        loop {
            let handle = if create_if_missing {
                self.store.get_or_create(id).await
            } else {
                self.store.get(id).await?
            };
            let guard = Arc::clone(&handle).lock_owned().await;

            match self.store.get(id).await {
                Ok(current) if Arc::ptr_eq(&current, &handle) => return Ok(guard),
                Ok(_) | Err(SessionStoreError::NotFound(_)) if create_if_missing => {
                    tracing::debug!(session_id = %id, "Session replaced while waiting, retrying");
                }
                Ok(_) | Err(SessionStoreError::NotFound(_)) => {
                    return Err(ProcessInputError::SessionNotFound(id));
                }
                Err(other) => return Err(other.into()),
            }
        }
    }

    /// Builds the completion request: phase prompt plus the recent history.
    fn build_request(&self, session: &DebriefSession) -> CompletionRequest {
        let metadata = RequestMetadata::new(session.id(), Uuid::new_v4().to_string());

        session
            .context_window(self.config.history_window)
            .iter()
            .fold(
                CompletionRequest::new(metadata)
                    .with_system_prompt(session.current_phase().prompt())
                    .with_temperature(self.config.temperature)
                    .with_max_tokens(self.config.max_tokens),
                |request, msg| {
                    let role = match msg.role() {
                        MessageRole::System => AIMessageRole::System,
                        MessageRole::User => AIMessageRole::User,
                        MessageRole::Assistant => AIMessageRole::Assistant,
                    };
                    request.with_message(role, msg.content())
                },
            )
    }
}

/// Shortens user input for log lines.
fn truncate_for_log(text: &str) -> String {
    if text.chars().count() <= LOG_INPUT_CHARS {
        return text.to_string();
    }
    let mut short: String = text.chars().take(LOG_INPUT_CHARS).collect();
    short.push_str("...");
    short
}
