//! Axum router assembly with middleware.
//!
//! Middleware: request tracing, request timeout, CORS.

use axum::http::HeaderValue;
use axum::Router;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;

use super::debrief::{self, DebriefAppState};

/// Build the complete router with all routes and middleware.
pub fn build_router(state: DebriefAppState, server: &ServerConfig) -> Router {
    debrief::routes()
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(server.request_timeout()))
        .layer(cors_layer(server))
        .with_state(state)
}

/// Any origin when none are configured, otherwise exactly the configured list.
fn cors_layer(server: &ServerConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = server
        .cors_origins_list()
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    let allow_origin = if origins.is_empty() {
        AllowOrigin::from(Any)
    } else {
        AllowOrigin::list(origins)
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods(Any)
        .allow_headers(Any)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::MockAIProvider;
    use crate::adapters::storage::InMemorySessionStore;
    use crate::config::DebriefConfig;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use std::sync::Arc;
    use tower::ServiceExt;

    fn state() -> DebriefAppState {
        DebriefAppState::new(
            Arc::new(InMemorySessionStore::new()),
            Arc::new(MockAIProvider::new()),
            DebriefConfig::default(),
        )
    }

    fn preflight(origin: &str) -> Request<Body> {
        Request::builder()
            .method("OPTIONS")
            .uri("/debrief")
            .header("origin", origin)
            .header("access-control-request-method", "POST")
            .body(Body::empty())
            .unwrap()
    }

    #[tokio::test]
    async fn allows_any_origin_by_default() {
        let app = build_router(state(), &ServerConfig::default());

        let response = app.oneshot(preflight("http://example.com")).await.unwrap();

        assert_eq!(
            response.headers().get("access-control-allow-origin").unwrap(),
            "*"
        );
    }

    #[tokio::test]
    async fn restricts_to_configured_origins() {
        let server = ServerConfig {
            cors_origins: Some("http://localhost:3000".to_string()),
            ..ServerConfig::default()
        };
        let app = build_router(state(), &server);

        let allowed = app
            .clone()
            .oneshot(preflight("http://localhost:3000"))
            .await
            .unwrap();
        let denied = app.oneshot(preflight("http://evil.test")).await.unwrap();

        assert_eq!(
            allowed.headers().get("access-control-allow-origin").unwrap(),
            "http://localhost:3000"
        );
        assert!(denied.headers().get("access-control-allow-origin").is_none());
    }

    #[tokio::test]
    async fn serves_health_through_middleware() {
        let app = build_router(state(), &ServerConfig::default());

        let response = app
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }
}
