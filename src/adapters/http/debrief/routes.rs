//! Route definitions for debrief endpoints

use axum::routing::{get, post};
use axum::Router;

use super::handlers::{
    debrief, end_debrief, get_debrief, health, list_phases, send_message, start_debrief,
    DebriefAppState,
};

/// Create debrief router with all endpoints
///
/// # Endpoints
///
/// - `GET /` - Health check
/// - `POST /debrief` - Process input (shared session unless an opened `session_id` is given)
/// - `GET /debrief/phases` - PEARLS framework overview
/// - `POST /debrief/sessions` - Start new session
/// - `GET /debrief/sessions/{session_id}` - Get session state
/// - `POST /debrief/sessions/{session_id}/messages` - Send message
/// - `DELETE /debrief/sessions/{session_id}` - End session
pub fn routes() -> Router<DebriefAppState> {
    Router::new()
        .route("/", get(health))
        .route("/debrief", post(debrief))
        .route("/debrief/phases", get(list_phases))
        .route("/debrief/sessions", post(start_debrief))
        .route(
            "/debrief/sessions/:session_id",
            get(get_debrief).delete(end_debrief),
        )
        .route("/debrief/sessions/:session_id/messages", post(send_message))
}
