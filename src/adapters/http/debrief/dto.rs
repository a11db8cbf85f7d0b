//! HTTP DTOs for debrief endpoints
//!
//! These types decouple the HTTP API from domain types, allowing independent evolution.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::debrief::{DebriefMessage, DebriefSession, MessageRole, PearlsPhase};

/// Message shown to end users for any upstream failure.
pub const UPSTREAM_APOLOGY: &str =
    "I apologize, but I encountered an error processing your input. Please try again.";

// ════════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Request for the single-conversation debrief endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct DebriefRequest {
    pub text: String,
    /// Omitted by single-user clients; the shared session is used then.
    #[serde(default)]
    pub session_id: Option<String>,
}

/// Request to send a message in a specific session
#[derive(Debug, Clone, Deserialize)]
pub struct SendMessageRequest {
    pub text: String,
}

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Health check payload
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

/// Reply to a debrief input
#[derive(Debug, Clone, Serialize)]
pub struct DebriefResponse {
    pub response: String,
    pub session_id: String,
    pub phase: PearlsPhase,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transitioned_to: Option<PearlsPhase>,
}

/// Response for starting a session
#[derive(Debug, Clone, Serialize)]
pub struct StartDebriefResponse {
    pub session_id: String,
    pub phase: PearlsPhase,
}

/// A message as exposed over HTTP
#[derive(Debug, Clone, Serialize)]
pub struct MessageView {
    pub role: MessageRole,
    pub content: String,
    pub phase: PearlsPhase,
    pub created_at: DateTime<Utc>,
}

impl From<&DebriefMessage> for MessageView {
    fn from(msg: &DebriefMessage) -> Self {
        Self {
            role: msg.role(),
            content: msg.content().to_string(),
            phase: msg.phase(),
            created_at: msg.created_at(),
        }
    }
}

/// Response for getting session state
#[derive(Debug, Clone, Serialize)]
pub struct SessionStateResponse {
    pub session_id: String,
    pub phase: PearlsPhase,
    pub message_count: usize,
    pub messages: Vec<MessageView>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&DebriefSession> for SessionStateResponse {
    fn from(session: &DebriefSession) -> Self {
        Self {
            session_id: session.id().to_string(),
            phase: session.current_phase(),
            message_count: session.message_count(),
            messages: session.messages().iter().map(MessageView::from).collect(),
            created_at: session.created_at(),
            updated_at: session.updated_at(),
        }
    }
}

/// Response for ending a session
#[derive(Debug, Clone, Serialize)]
pub struct EndDebriefResponse {
    pub session_id: String,
    pub final_phase: PearlsPhase,
    pub message_count: usize,
    pub completed: bool,
}

/// One entry of the PEARLS framework overview
#[derive(Debug, Clone, Serialize)]
pub struct PhaseView {
    pub phase: PearlsPhase,
    pub code: String,
    pub label: &'static str,
    pub description: &'static str,
    pub min_messages: usize,
    pub next: Option<PearlsPhase>,
}

impl From<PearlsPhase> for PhaseView {
    fn from(phase: PearlsPhase) -> Self {
        Self {
            phase,
            code: phase.code().to_string(),
            label: phase.label(),
            description: phase.description(),
            min_messages: phase.min_messages(),
            next: phase.next(),
        }
    }
}

/// Standard error response
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            code: "BAD_REQUEST".to_string(),
            message: message.into(),
            details: None,
        }
    }

    pub fn not_found(resource_type: &str, id: &str) -> Self {
        Self {
            code: "NOT_FOUND".to_string(),
            message: format!("{} not found: {}", resource_type, id),
            details: None,
        }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self {
            code: "CONFLICT".to_string(),
            message: message.into(),
            details: None,
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            code: "INTERNAL_ERROR".to_string(),
            message: message.into(),
            details: None,
        }
    }

    /// Opaque upstream failure; `cause` is only attached when verbose errors are on.
    pub fn upstream(cause: Option<String>) -> Self {
        Self {
            code: "UPSTREAM_ERROR".to_string(),
            message: UPSTREAM_APOLOGY.to_string(),
            details: cause.map(serde_json::Value::String),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debrief_request_session_id_is_optional() {
        let req: DebriefRequest = serde_json::from_str(r#"{"text":"Hello"}"#).unwrap();
        assert_eq!(req.text, "Hello");
        assert!(req.session_id.is_none());
    }

    #[test]
    fn debrief_response_omits_missing_transition() {
        let response = DebriefResponse {
            response: "Hi".to_string(),
            session_id: "abc".to_string(),
            phase: PearlsPhase::Preparation,
            transitioned_to: None,
        };
        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(json["phase"], "preparation");
        assert!(json.get("transitioned_to").is_none());
    }

    #[test]
    fn phase_view_lists_framework_details() {
        let view = PhaseView::from(PearlsPhase::Analysis);
        assert_eq!(view.code, "A");
        assert_eq!(view.label, "Analysis");
        assert_eq!(view.min_messages, 4);
        assert_eq!(view.next, Some(PearlsPhase::Reflection));
    }

    #[test]
    fn upstream_error_hides_cause_by_default() {
        let json = serde_json::to_value(ErrorResponse::upstream(None)).unwrap();
        assert_eq!(json["code"], "UPSTREAM_ERROR");
        assert_eq!(json["message"], UPSTREAM_APOLOGY);
        assert!(json.get("details").is_none());
    }

    #[test]
    fn internal_error_has_its_own_code() {
        let json = serde_json::to_value(ErrorResponse::internal("store failed")).unwrap();
        assert_eq!(json["code"], "INTERNAL_ERROR");
        assert_eq!(json["message"], "store failed");
    }

    #[test]
    fn error_response_serialization() {
        let error = ErrorResponse::not_found("Debrief session", "abc");
        let json = serde_json::to_string(&error).unwrap();

        assert!(json.contains("NOT_FOUND"));
        assert!(json.contains("Debrief session not found"));
    }
}
