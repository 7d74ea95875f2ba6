//! Scan handler

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use super::AppJson;
use crate::models::{ScanRequest, ScanResult};
use crate::{AppError, AppResult, AppState};

/// Shorter addresses are rejected before scanning
pub const MIN_ADDRESS_LEN: usize = 3;

pub async fn scan(
    State(state): State<AppState>,
    AppJson(req): AppJson<ScanRequest>,
) -> AppResult<Response> {
    let address = req.address.trim().to_string();
    if address.chars().count() < MIN_ADDRESS_LEN {
        return Err(AppError::ValidationError("Invalid address".to_string()));
    }

    // Run in its own task so a panic in the pipeline becomes a degraded answer
    let scanner = state.scanner.clone();
    match tokio::spawn(async move { scanner.scan(&address).await }).await {
        Ok(result) => Ok(Json(result).into_response()),
        Err(e) => {
            tracing::error!("Scan task failed: {}", e);
            let body = ScanResult::error("Internal analysis error. Please retry later.");
            Ok((StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response())
        }
    }
}
