//! Threat report handlers

use axum::{extract::State, Json};

use super::AppJson;
use crate::models::{
    LedgerAck, NewReport, ReportAction, ReportActionRequest, ReportIdRequest, ThreatReport,
};
use crate::{AppResult, AppState};

/// Full ledger, newest first
pub async fn list(State(state): State<AppState>) -> Json<Vec<ThreatReport>> {
    Json(state.ledger.list().await)
}

/// Community submission, always queued as pending
pub async fn submit(
    State(state): State<AppState>,
    AppJson(req): AppJson<NewReport>,
) -> AppResult<Json<LedgerAck>> {
    let report = state.ledger.submit(req).await?;
    Ok(Json(LedgerAck::with_id(report.id)))
}

/// Trusted insertion, keeps a supplied status
pub async fn add(
    State(state): State<AppState>,
    AppJson(req): AppJson<NewReport>,
) -> AppResult<Json<LedgerAck>> {
    let report = state.ledger.add(req).await?;
    Ok(Json(LedgerAck::with_id(report.id)))
}

pub async fn approve(
    State(state): State<AppState>,
    AppJson(req): AppJson<ReportIdRequest>,
) -> AppResult<Json<LedgerAck>> {
    state.ledger.approve(req.id).await?;
    Ok(Json(LedgerAck::ok()))
}

pub async fn delete(
    State(state): State<AppState>,
    AppJson(req): AppJson<ReportIdRequest>,
) -> AppResult<Json<LedgerAck>> {
    state.ledger.delete(req.id).await?;
    Ok(Json(LedgerAck::ok()))
}

/// `{action, id}` moderation endpoint
pub async fn action(
    State(state): State<AppState>,
    AppJson(req): AppJson<ReportActionRequest>,
) -> AppResult<Json<LedgerAck>> {
    match req.action {
        ReportAction::Approve => {
            state.ledger.approve(req.id).await?;
        }
        ReportAction::Delete => {
            state.ledger.delete(req.id).await?;
        }
    }
    Ok(Json(LedgerAck::ok()))
}
