//! Integration tests for the debrief HTTP API.
//!
//! These tests wire the full stack together:
//! 1. Axum router with middleware
//! 2. Application handlers and the in-memory session store
//! 3. The OpenAI-compatible provider talking to a stubbed upstream

use std::sync::Arc;
use std::time::Duration;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use pearls_debrief::adapters::{
    build_router, DebriefAppState, InMemorySessionStore, OpenAICompatConfig,
    OpenAICompatProvider,
};
use pearls_debrief::config::{DebriefConfig, ServerConfig};
use pearls_debrief::domain::debrief::PearlsPhase;

// =============================================================================
// Test Infrastructure
// =============================================================================

fn completion(content: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "id": "cmpl-1",
        "model": "sonar-medium-online",
        "choices": [{
            "index": 0,
            "message": {"role": "assistant", "content": content},
            "finish_reason": "stop"
        }],
        "usage": {"prompt_tokens": 40, "completion_tokens": 12}
    }))
}

fn app_for(upstream: &MockServer, verbose_errors: bool) -> Router {
    let config = OpenAICompatConfig::new("test-key", upstream.uri(), "sonar-medium-online")
        .with_provider_name("perplexity")
        .with_timeout(Duration::from_secs(5));
    let provider = OpenAICompatProvider::new(config).unwrap();

    let state = DebriefAppState::new(
        Arc::new(InMemorySessionStore::new()),
        Arc::new(provider),
        DebriefConfig::default(),
    )
    .with_verbose_errors(verbose_errors);

    build_router(state, &ServerConfig::default())
}

fn debrief_request(text: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/debrief")
        .header("content-type", "application/json")
        .body(Body::from(json!({ "text": text }).to_string()))
        .unwrap()
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

// =============================================================================
// Happy Path
// =============================================================================

#[tokio::test]
async fn two_inputs_move_the_shared_session_to_engagement() {
    let upstream = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(header("Authorization", "Bearer test-key"))
        .and(body_partial_json(json!({
            "model": "sonar-medium-online",
            "temperature": 0.7,
            "max_tokens": 500
        })))
        .respond_with(completion("Thanks for sharing."))
        .expect(2)
        .mount(&upstream)
        .await;

    let app = app_for(&upstream, false);

    let (status, first) = send(&app, debrief_request("Hi, I just finished the scenario")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(first["response"]
        .as_str()
        .unwrap()
        .ends_with("We're now moving to the Engagement phase of our debriefing."));
    assert_eq!(first["transitioned_to"], "engagement");

    let (status, second) = send(&app, debrief_request("It felt chaotic")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(second["response"], "Thanks for sharing.");
    assert_eq!(second["phase"], "engagement");
    assert_eq!(first["session_id"], second["session_id"]);
}

#[tokio::test]
async fn upstream_receives_phase_prompt_first() {
    let upstream = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(body_partial_json(json!({
            "messages": [
                {"role": "system", "content": PearlsPhase::Preparation.prompt()},
                {"role": "user", "content": "Hello"}
            ]
        })))
        .respond_with(completion("Welcome."))
        .expect(1)
        .mount(&upstream)
        .await;

    let app = app_for(&upstream, false);
    let (status, _) = send(&app, debrief_request("Hello")).await;

    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn explicit_sessions_are_independent() {
    let upstream = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(completion("Noted."))
        .mount(&upstream)
        .await;

    let app = app_for(&upstream, false);

    let (_, a) = send(
        &app,
        Request::builder()
            .method("POST")
            .uri("/debrief/sessions")
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    let (_, b) = send(
        &app,
        Request::builder()
            .method("POST")
            .uri("/debrief/sessions")
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    let a_id = a["session_id"].as_str().unwrap();
    let b_id = b["session_id"].as_str().unwrap();

    let (status, _) = send(
        &app,
        Request::builder()
            .method("POST")
            .uri(format!("/debrief/sessions/{}/messages", a_id))
            .header("content-type", "application/json")
            .body(Body::from(json!({"text": "First"}).to_string()))
            .unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, a_state) = send(
        &app,
        Request::builder()
            .uri(format!("/debrief/sessions/{}", a_id))
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    let (_, b_state) = send(
        &app,
        Request::builder()
            .uri(format!("/debrief/sessions/{}", b_id))
            .body(Body::empty())
            .unwrap(),
    )
    .await;

    assert_eq!(a_state["phase"], "engagement");
    assert_eq!(a_state["message_count"], 2);
    assert_eq!(b_state["phase"], "preparation");
    assert_eq!(b_state["message_count"], 0);
}

// =============================================================================
// Failures
// =============================================================================

#[tokio::test]
async fn upstream_500_returns_apology_and_keeps_user_message() {
    let upstream = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500).set_body_string("model overloaded"))
        .mount(&upstream)
        .await;

    let app = app_for(&upstream, false);
    let (status, body) = send(&app, debrief_request("Hello")).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["code"], "UPSTREAM_ERROR");
    assert!(body.get("details").is_none());

    let shared = pearls_debrief::domain::foundation::DebriefSessionId::shared();
    let (_, state) = send(
        &app,
        Request::builder()
            .uri(format!("/debrief/sessions/{}", shared))
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(state["phase"], "preparation");
    assert_eq!(state["message_count"], 1);
    assert_eq!(state["messages"][0]["role"], "user");
}

#[tokio::test]
async fn missing_choices_is_reported_when_verbose() {
    let upstream = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "cmpl-1"})))
        .mount(&upstream)
        .await;

    let app = app_for(&upstream, true);
    let (status, body) = send(&app, debrief_request("Hello")).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["details"]
        .as_str()
        .unwrap()
        .contains("No choices in response"));
}
