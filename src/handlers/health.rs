//! Health check handlers

use axum::{extract::State, Json};
use serde::Serialize;

use crate::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    status: &'static str,
    version: &'static str,
    timestamp: i64,
}

#[derive(Serialize)]
pub struct RootResponse {
    status: &'static str,
    version: &'static str,
    environment: String,
    scan_mode: &'static str,
    reports: usize,
}

pub async fn check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        timestamp: chrono::Utc::now().timestamp(),
    })
}

/// Liveness banner with the current report count
pub async fn root(State(state): State<AppState>) -> Json<RootResponse> {
    Json(RootResponse {
        status: "Gold Guard AI is Online",
        version: env!("CARGO_PKG_VERSION"),
        environment: state.config.environment.clone(),
        scan_mode: state.scanner.mode().as_str(),
        reports: state.ledger.count().await,
    })
}
