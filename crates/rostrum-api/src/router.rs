//! Router configuration and server setup.

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

use crate::config::ApiConfig;
use crate::handlers;
use crate::state::AppState;

/// Creates the API router with all routes configured.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/health", get(handlers::health))
        .route("/api/debate", post(handlers::run_debate))
        .route("/api/debate/stream", post(handlers::stream_debate))
        .layer(cors)
        .with_state(state)
}

/// Starts the API server.
pub async fn serve(config: ApiConfig, state: AppState) -> Result<(), std::io::Error> {
    let addr = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("API server listening on {}", addr);
    axum::serve(listener, create_router(state)).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum_test::TestServer;
    use rostrum_orchestrator::Settings;
    use serde_json::json;

    fn make_test_server() -> TestServer {
        let state = AppState::new(ApiConfig::default(), Settings::default());
        TestServer::new(create_router(state)).unwrap()
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let server = make_test_server();

        let response = server.get("/api/health").await;
        response.assert_status_ok();

        let body: serde_json::Value = response.json();
        assert_eq!(body["status"], "ok");
        assert!(!body["version"].as_str().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_debate_without_credentials_is_bad_request() {
        let server = make_test_server();

        let response = server
            .post("/api/debate")
            .json(&json!({"topic": "Topic X"}))
            .await;

        response.assert_status(axum::http::StatusCode::BAD_REQUEST);

        let body: serde_json::Value = response.json();
        assert!(body["error"].as_str().unwrap().contains("google_api_key"));
    }

    #[tokio::test]
    async fn test_debate_with_unknown_provider_is_bad_request() {
        let server = make_test_server();

        let response = server
            .post("/api/debate")
            .json(&json!({"topic": "T", "pro": {"provider": "mystery"}}))
            .await;

        response.assert_status(axum::http::StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_stream_setup_failure_yields_error_event() {
        let server = make_test_server();

        let response = server
            .post("/api/debate/stream")
            .json(&json!({"topic": "Topic X"}))
            .await;

        // Setup failures stream as a terminal error event, not an HTTP
        // error.
        response.assert_status_ok();
        let body = response.text();
        assert!(body.contains("\"type\":\"error\""));
        assert!(body.contains("google_api_key"));
    }

    #[tokio::test]
    async fn test_cors_headers_present() {
        let server = make_test_server();
        let response = server.get("/api/health").await;

        assert!(response
            .headers()
            .contains_key("access-control-allow-origin"));
    }
}
