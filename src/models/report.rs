//! Threat report model

use serde::{Deserialize, Serialize};
use validator::Validate;

pub const ANONYMOUS_REPORTER: &str = "Anonymous";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportStatus {
    Pending,
    Approved,
}

impl ReportStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportStatus::Pending => "pending",
            ReportStatus::Approved => "approved",
        }
    }
}

impl Default for ReportStatus {
    fn default() -> Self {
        ReportStatus::Pending
    }
}

/// A community-submitted scam report as stored in the ledger
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThreatReport {
    /// Assigned by the ledger, millisecond-derived and strictly increasing
    pub id: i64,
    pub target: String,
    #[serde(alias = "desc")]
    pub description: String,
    #[serde(default)]
    pub status: ReportStatus,
    #[serde(default = "anonymous")]
    pub reporter_wallet: String,
    #[serde(default)]
    pub img: Option<String>,
    /// Unix milliseconds. Ordering only.
    #[serde(default)]
    pub created_at: i64,
}

fn anonymous() -> String {
    ANONYMOUS_REPORTER.to_string()
}

/// Inbound report body. `id` is never accepted from callers.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct NewReport {
    #[serde(default)]
    #[validate(length(min = 1, message = "target is required"))]
    pub target: String,
    #[serde(default, alias = "desc")]
    #[validate(length(min = 1, message = "description is required"))]
    pub description: String,
    #[serde(default)]
    pub reporter_wallet: Option<String>,
    #[serde(default)]
    pub img: Option<String>,
    /// Honored only on the trusted insertion path
    #[serde(default)]
    pub status: Option<ReportStatus>,
}

impl NewReport {
    /// Trim free-text fields and drop blank optionals
    pub fn normalized(mut self) -> Self {
        self.target = self.target.trim().to_string();
        self.description = self.description.trim().to_string();
        self.reporter_wallet = self
            .reporter_wallet
            .map(|w| w.trim().to_string())
            .filter(|w| !w.is_empty());
        self.img = self.img.filter(|i| !i.trim().is_empty());
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportAction {
    Approve,
    Delete,
}

#[derive(Debug, Deserialize)]
pub struct ReportActionRequest {
    pub action: ReportAction,
    pub id: i64,
}

#[derive(Debug, Deserialize)]
pub struct ReportIdRequest {
    pub id: i64,
}

/// Acknowledgment for ledger mutations
#[derive(Debug, Serialize)]
pub struct LedgerAck {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
}

impl LedgerAck {
    pub fn ok() -> Self {
        Self { success: true, id: None }
    }

    pub fn with_id(id: i64) -> Self {
        Self { success: true, id: Some(id) }
    }
}
