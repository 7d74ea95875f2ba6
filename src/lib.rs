//! Gold Guard Server
//!
//! Token risk scanner and community scam-report ledger.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                       GOLD GUARD                            │
//! ├─────────────────────────────────────────────────────────────┤
//! │  ┌───────────┐      ┌──────────────────┐  ┌──────────────┐ │
//! │  │  API      │─────▶│  Scoring Engine  │─▶│ Signal Source│ │
//! │  │  (Axum)   │      │  denylist → sim/ │  │ (RPC / Aggr.)│ │
//! │  │           │      │  on-chain/aggr.  │  └──────────────┘ │
//! │  │           │      └──────────────────┘                   │
//! │  │           │      ┌──────────────────┐  ┌──────────────┐ │
//! │  │           │─────▶│  Report Ledger   │─▶│ Memory/File/ │ │
//! │  └───────────┘      │  load→mutate→save│  │ Remote bin   │ │
//! │                     └──────────────────┘  └──────────────┘ │
//! └─────────────────────────────────────────────────────────────┘
//! ```

pub mod config;
pub mod error;
pub mod handlers;
pub mod ledger;
pub mod models;
pub mod scoring;

use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::{
    cors::{CorsLayer, Any},
    trace::TraceLayer,
    compression::CompressionLayer,
};

pub use error::{AppError, AppResult};

use ledger::{AnyStore, Ledger};
use scoring::Scanner;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub scanner: Arc<Scanner>,
    pub ledger: Arc<Ledger<AnyStore>>,
    pub config: config::Config,
}

impl AppState {
    pub fn new(scanner: Scanner, ledger: Ledger<AnyStore>, config: config::Config) -> Self {
        Self {
            scanner: Arc::new(scanner),
            ledger: Arc::new(ledger),
            config,
        }
    }
}

/// Create the main router with all routes
pub fn create_router(state: AppState) -> Router {
    let scan_routes = Router::new()
        .route("/", get(handlers::health::root))
        .route("/health", get(handlers::health::check))
        .route("/scan", post(handlers::scan::scan));

    // Both route families are served; clients use either naming
    let report_routes = Router::new()
        .route("/reports", get(handlers::reports::list))
        .route("/reports/add", post(handlers::reports::add))
        .route("/reports/approve", post(handlers::reports::approve))
        .route("/reports/delete", post(handlers::reports::delete))
        .route("/report/list", get(handlers::reports::list))
        .route("/report/submit", post(handlers::reports::submit))
        .route("/report/action", post(handlers::reports::action));

    Router::new()
        .merge(scan_routes)
        .merge(report_routes)
        .fallback(handlers::fallback)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any)
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    fn app() -> Router {
        let state = AppState::new(
            Scanner::simulated(),
            Ledger::new(AnyStore::memory()),
            config::Config::default(),
        );
        create_router(state)
    }

    async fn call(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(match body {
                Some(v) => Body::from(v.to_string()),
                None => Body::empty(),
            })
            .unwrap();

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, value)
    }

    #[tokio::test]
    async fn test_root_reports_count() {
        let app = app();
        let (status, body) = call(&app, "GET", "/", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["reports"], 0);
        assert_eq!(body["scan_mode"], "simulated");
    }

    #[tokio::test]
    async fn test_scan_blacklisted() {
        let app = app();
        let (status, body) = call(&app, "POST", "/scan", Some(json!({ "address": "  Honeypot123 " }))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["score"], 0);
        assert_eq!(body["risk"], "CRITICAL");
        assert_eq!(body["checks"][0]["status"], "BLACKLISTED");
    }

    #[tokio::test]
    async fn test_scan_simulated() {
        let app = app();
        let (status, body) = call(&app, "POST", "/scan", Some(json!({ "address": "TokenA" }))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["score"], 82);
        assert_eq!(body["risk"], "LOW");
        assert_eq!(body["checks"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_scan_rejects_short_or_missing_address() {
        let app = app();
        for body in [json!({ "address": " ab " }), json!({})] {
            let (status, body) = call(&app, "POST", "/scan", Some(body)).await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(body["success"], false);
            assert_eq!(body["error"], "Invalid address");
        }
    }

    #[tokio::test]
    async fn test_report_lifecycle() {
        let app = app();

        let (status, ack) = call(&app, "POST", "/report/submit", Some(json!({ "target": "FakeToken", "desc": "test" }))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(ack["success"], true);
        let id = ack["id"].as_i64().unwrap();

        let (_, list) = call(&app, "GET", "/report/list", None).await;
        assert_eq!(list[0]["id"], id);
        assert_eq!(list[0]["status"], "pending");
        assert_eq!(list[0]["reporter_wallet"], "Anonymous");

        let (status, _) = call(&app, "POST", "/report/action", Some(json!({ "action": "approve", "id": id }))).await;
        assert_eq!(status, StatusCode::OK);
        let (_, list) = call(&app, "GET", "/reports", None).await;
        assert_eq!(list[0]["status"], "approved");

        let (status, _) = call(&app, "POST", "/reports/delete", Some(json!({ "id": id }))).await;
        assert_eq!(status, StatusCode::OK);
        let (_, list) = call(&app, "GET", "/reports", None).await;
        assert!(list.as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_trusted_add_and_ordering() {
        let app = app();

        let (_, first) = call(&app, "POST", "/reports/add", Some(json!({ "target": "RugA", "description": "a", "status": "approved" }))).await;
        let (_, second) = call(&app, "POST", "/reports/add", Some(json!({ "target": "RugB", "description": "b", "reporter_wallet": "Wallet1" }))).await;

        let (_, list) = call(&app, "GET", "/reports", None).await;
        assert_eq!(list[0]["id"], second["id"]);
        assert_eq!(list[1]["id"], first["id"]);
        assert_eq!(list[1]["status"], "approved");
        assert_eq!(list[0]["reporter_wallet"], "Wallet1");

        let (_, root) = call(&app, "GET", "/", None).await;
        assert_eq!(root["reports"], 2);
    }

    #[tokio::test]
    async fn test_unknown_id_is_acknowledged() {
        let app = app();
        let (status, ack) = call(&app, "POST", "/report/action", Some(json!({ "action": "delete", "id": 12345 }))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(ack["success"], true);

        let (status, _) = call(&app, "POST", "/reports/approve", Some(json!({ "id": 12345 }))).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_invalid_report_body() {
        let app = app();
        let (status, body) = call(&app, "POST", "/report/submit", Some(json!({ "target": "", "description": "x" }))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);
    }

    #[tokio::test]
    async fn test_malformed_bodies_use_error_envelope() {
        let app = app();

        let (status, body) = call(&app, "POST", "/scan", Some(json!({ "address": 123 }))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);
        assert_eq!(body["status"], 400);

        let (status, body) = call(&app, "POST", "/report/action", Some(json!({ "action": "revert", "id": 1 }))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);

        // No content-type header
        let request = Request::builder()
            .method("POST")
            .uri("/report/submit")
            .body(Body::from(r#"{"target":"FakeToken","desc":"test"}"#))
            .unwrap();
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["success"], false);
        assert!(!body["error"].as_str().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_unknown_route() {
        let app = app();
        let (status, _) = call(&app, "GET", "/nope", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
