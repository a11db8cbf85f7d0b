//! HTTP handlers for debrief endpoints
//!
//! These handlers connect Axum routes to application layer command/query handlers.

use std::str::FromStr;
use std::sync::Arc;

use axum::extract::{Json, Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::application::handlers::debrief::{
    EndDebriefCommand, EndDebriefError, EndDebriefHandler, GetDebriefError, GetDebriefHandler,
    GetDebriefQuery, ProcessInputCommand, ProcessInputError, ProcessInputHandler,
    ProcessInputResult, StartDebriefCommand, StartDebriefError, StartDebriefHandler,
};
use crate::config::DebriefConfig;
use crate::domain::debrief::PearlsPhase;
use crate::domain::foundation::DebriefSessionId;
use crate::ports::{AIProvider, DebriefSessionStore, SessionStoreError};

use super::dto::{
    DebriefRequest, DebriefResponse, EndDebriefResponse, ErrorResponse, HealthResponse,
    PhaseView, SendMessageRequest, SessionStateResponse, StartDebriefResponse,
};

type HttpError = (StatusCode, Json<ErrorResponse>);

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

/// Shared application state containing all dependencies
#[derive(Clone)]
pub struct DebriefAppState {
    pub store: Arc<dyn DebriefSessionStore>,
    pub ai_provider: Arc<dyn AIProvider>,
    pub debrief_config: DebriefConfig,
    /// Attach upstream failure causes to error responses.
    pub verbose_errors: bool,
}

impl DebriefAppState {
    pub fn new(
        store: Arc<dyn DebriefSessionStore>,
        ai_provider: Arc<dyn AIProvider>,
        debrief_config: DebriefConfig,
    ) -> Self {
        Self {
            store,
            ai_provider,
            debrief_config,
            verbose_errors: false,
        }
    }

    pub fn with_verbose_errors(mut self, verbose: bool) -> Self {
        self.verbose_errors = verbose;
        self
    }

    pub fn process_input_handler(&self) -> ProcessInputHandler<dyn AIProvider> {
        ProcessInputHandler::new(
            self.store.clone(),
            self.ai_provider.clone(),
            self.debrief_config.clone(),
        )
    }

    pub fn start_debrief_handler(&self) -> StartDebriefHandler {
        StartDebriefHandler::new(self.store.clone())
    }

    pub fn get_debrief_handler(&self) -> GetDebriefHandler {
        GetDebriefHandler::new(self.store.clone())
    }

    pub fn end_debrief_handler(&self) -> EndDebriefHandler {
        EndDebriefHandler::new(self.store.clone())
    }

    /// Runs one input and shapes the reply or the error for HTTP.
    async fn process(&self, cmd: ProcessInputCommand) -> Result<DebriefResponse, HttpError> {
        let session_id = cmd.session_id;
        let result = self
            .process_input_handler()
            .handle(cmd)
            .await
            .map_err(|e| self.process_error(e, session_id))?;

        Ok(debrief_response(result))
    }

    fn process_error(&self, err: ProcessInputError, session_id: DebriefSessionId) -> HttpError {
        match err {
            ProcessInputError::SessionNotFound(_) => (
                StatusCode::NOT_FOUND,
                Json(ErrorResponse::not_found(
                    "Debrief session",
                    &session_id.to_string(),
                )),
            ),
            ProcessInputError::EmptyInput => (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::bad_request("Text cannot be empty")),
            ),
            ProcessInputError::Store(e) => store_error(e),
            ProcessInputError::Upstream(_) | ProcessInputError::MalformedResponse(_) => {
                let cause = self.verbose_errors.then(|| err.to_string());
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorResponse::upstream(cause)),
                )
            }
        }
    }
}

fn debrief_response(result: ProcessInputResult) -> DebriefResponse {
    DebriefResponse {
        response: result.response_text,
        session_id: result.session_id.to_string(),
        phase: result.phase_after,
        transitioned_to: result.transition.map(|t| t.to),
    }
}

fn store_error(err: SessionStoreError) -> HttpError {
    tracing::error!(error = %err, "Unexpected session store failure");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse::internal("Session store failure")),
    )
}

fn parse_session_id(raw: &str) -> Result<DebriefSessionId, HttpError> {
    DebriefSessionId::from_str(raw).map_err(|_| {
        (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::bad_request("Invalid session_id format")),
        )
    })
}

// ════════════════════════════════════════════════════════════════════════════════
// Handlers
// ════════════════════════════════════════════════════════════════════════════════

/// Health check
///
/// GET /
pub async fn health() -> impl IntoResponse {
    Json(HealthResponse { status: "ok" })
}

/// Process input
///
/// POST /debrief
///
/// Without a `session_id` the input goes to the shared session, which is
/// created on first use. An explicit `session_id` must name a session opened
/// with `POST /debrief/sessions`; unknown ids are 404 and nothing is created.
pub async fn debrief(
    State(app_state): State<DebriefAppState>,
    Json(req): Json<DebriefRequest>,
) -> Result<impl IntoResponse, impl IntoResponse> {
    let cmd = match req.session_id.as_deref() {
        Some(raw) => ProcessInputCommand::new(parse_session_id(raw)?, req.text),
        None => ProcessInputCommand::new(DebriefSessionId::shared(), req.text).creating_if_missing(),
    };
    let response = app_state.process(cmd).await?;

    Ok::<_, HttpError>((StatusCode::OK, Json(response)))
}

/// List the PEARLS phases in protocol order
///
/// GET /debrief/phases
pub async fn list_phases() -> impl IntoResponse {
    let phases: Vec<PhaseView> = PearlsPhase::all().into_iter().map(PhaseView::from).collect();
    Json(phases)
}

/// Start a new debrief session
///
/// POST /debrief/sessions
pub async fn start_debrief(
    State(app_state): State<DebriefAppState>,
) -> Result<impl IntoResponse, impl IntoResponse> {
    let handler = app_state.start_debrief_handler();
    let result = handler
        .handle(StartDebriefCommand::default())
        .await
        .map_err(|e| match e {
            StartDebriefError::AlreadyExists(_) => (
                StatusCode::CONFLICT,
                Json(ErrorResponse::conflict(e.to_string())),
            ),
            StartDebriefError::Store(e) => store_error(e),
        })?;

    let response = StartDebriefResponse {
        session_id: result.session_id.to_string(),
        phase: result.phase,
    };

    Ok::<_, HttpError>((StatusCode::CREATED, Json(response)))
}

/// Get session state
///
/// GET /debrief/sessions/{session_id}
pub async fn get_debrief(
    State(app_state): State<DebriefAppState>,
    Path(session_id): Path<String>,
) -> Result<impl IntoResponse, impl IntoResponse> {
    let session_id = parse_session_id(&session_id)?;

    let handler = app_state.get_debrief_handler();
    let session = handler
        .handle(GetDebriefQuery { session_id })
        .await
        .map_err(|e| match e {
            GetDebriefError::NotFound(_) => (
                StatusCode::NOT_FOUND,
                Json(ErrorResponse::not_found(
                    "Debrief session",
                    &session_id.to_string(),
                )),
            ),
            GetDebriefError::Store(e) => store_error(e),
        })?;

    Ok::<_, HttpError>((StatusCode::OK, Json(SessionStateResponse::from(&session))))
}

/// Send a message in an existing session
///
/// POST /debrief/sessions/{session_id}/messages
pub async fn send_message(
    State(app_state): State<DebriefAppState>,
    Path(session_id): Path<String>,
    Json(req): Json<SendMessageRequest>,
) -> Result<impl IntoResponse, impl IntoResponse> {
    let session_id = parse_session_id(&session_id)?;

    let cmd = ProcessInputCommand::new(session_id, req.text);
    let response = app_state.process(cmd).await?;

    Ok::<_, HttpError>((StatusCode::OK, Json(response)))
}

/// End a session
///
/// DELETE /debrief/sessions/{session_id}
pub async fn end_debrief(
    State(app_state): State<DebriefAppState>,
    Path(session_id): Path<String>,
) -> Result<impl IntoResponse, impl IntoResponse> {
    let session_id = parse_session_id(&session_id)?;

    let handler = app_state.end_debrief_handler();
    let result = handler
        .handle(EndDebriefCommand { session_id })
        .await
        .map_err(|e| match e {
            EndDebriefError::NotFound(_) => (
                StatusCode::NOT_FOUND,
                Json(ErrorResponse::not_found(
                    "Debrief session",
                    &session_id.to_string(),
                )),
            ),
            EndDebriefError::Store(e) => store_error(e),
        })?;

    let response = EndDebriefResponse {
        session_id: result.session_id.to_string(),
        final_phase: result.final_phase,
        message_count: result.message_count,
        completed: result.completed,
    };

    Ok::<_, HttpError>((StatusCode::OK, Json(response)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::MockAIProvider;
    use crate::adapters::storage::InMemorySessionStore;
    use crate::ports::AIError;

    fn test_app_state(provider: MockAIProvider) -> DebriefAppState {
        DebriefAppState::new(
            Arc::new(InMemorySessionStore::new()),
            Arc::new(provider),
            DebriefConfig::default(),
        )
    }

    #[tokio::test]
    async fn process_maps_result_to_response() {
        let state = test_app_state(MockAIProvider::new().with_response("Welcome."));

        let response = state
            .process(
                ProcessInputCommand::new(DebriefSessionId::shared(), "Hi").creating_if_missing(),
            )
            .await
            .unwrap();

        assert!(response.response.starts_with("Welcome."));
        assert_eq!(response.phase, PearlsPhase::Engagement);
        assert_eq!(response.transitioned_to, Some(PearlsPhase::Engagement));
        assert_eq!(response.session_id, DebriefSessionId::shared().to_string());
    }

    #[tokio::test]
    async fn upstream_failure_is_opaque_by_default() {
        let state = test_app_state(MockAIProvider::new().with_error(AIError::upstream(503, "x")));

        let (status, Json(body)) = state
            .process(
                ProcessInputCommand::new(DebriefSessionId::shared(), "Hi").creating_if_missing(),
            )
            .await
            .unwrap_err();

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body.code, "UPSTREAM_ERROR");
        assert!(body.details.is_none());
    }

    #[tokio::test]
    async fn verbose_errors_include_cause() {
        let state = test_app_state(
            MockAIProvider::new().with_error(AIError::malformed("No choices in response")),
        )
        .with_verbose_errors(true);

        let (status, Json(body)) = state
            .process(
                ProcessInputCommand::new(DebriefSessionId::shared(), "Hi").creating_if_missing(),
            )
            .await
            .unwrap_err();

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        let details = body.details.unwrap();
        assert!(details.as_str().unwrap().contains("No choices in response"));
    }

    #[test]
    fn store_failure_is_internal_error() {
        let state = test_app_state(MockAIProvider::new());
        let id = DebriefSessionId::new();

        let (status, Json(body)) = state.process_error(
            ProcessInputError::Store(SessionStoreError::AlreadyExists(id)),
            id,
        );

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body.code, "INTERNAL_ERROR");
    }

    #[test]
    fn parse_session_id_rejects_garbage() {
        let (status, _) = parse_session_id("not-a-uuid").unwrap_err();
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
