//! Report Ledger
//!
//! Owns the ordered collection of community threat reports. Every call runs
//! one load -> mutate -> save cycle against the store under a single lock,
//! so concurrent mutations cannot lose each other's updates within this
//! process. Writers outside the process are not coordinated with.
//!
//! Absent, empty or unparseable content is treated as an empty ledger and
//! immediately rewritten as `[]`.

pub mod store;
pub mod file;
pub mod remote;

use chrono::Utc;
use thiserror::Error;
use tokio::sync::Mutex;
use validator::Validate;

use crate::models::{NewReport, ReportStatus, ThreatReport, ANONYMOUS_REPORTER};

pub use file::FileStore;
pub use remote::RemoteStore;
pub use store::{AnyStore, MemoryStore, ReportStore, StorageBackend, StoreError};

const EMPTY_LEDGER: &[u8] = b"[]";

#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("Invalid report: {0}")]
    Invalid(String),

    #[error("Failed to read ledger: {0}")]
    Unreadable(StoreError),

    #[error("Failed to persist ledger: {0}")]
    Write(StoreError),
}

/// What the store handed back on load
enum Contents {
    Reports(Vec<ThreatReport>),
    Missing,
    Blank,
    Corrupt(serde_json::Error),
}

fn parse_contents(raw: Option<Vec<u8>>) -> Contents {
    let Some(bytes) = raw else {
        return Contents::Missing;
    };
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Contents::Blank;
    }
    match serde_json::from_slice::<Vec<ThreatReport>>(&bytes) {
        Ok(reports) => Contents::Reports(reports),
        Err(e) => Contents::Corrupt(e),
    }
}

pub struct Ledger<S> {
    store: S,
    lock: Mutex<()>,
}

impl<S: ReportStore> Ledger<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            lock: Mutex::new(()),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Newest first. Read failures degrade to an empty list.
    pub async fn list(&self) -> Vec<ThreatReport> {
        let _guard = self.lock.lock().await;
        match self.load().await {
            Ok(reports) => reports,
            Err(e) => {
                tracing::warn!("Ledger unreadable, serving empty list: {}", e);
                Vec::new()
            }
        }
    }

    pub async fn count(&self) -> usize {
        self.list().await.len()
    }

    /// Public submission path: always `pending`
    pub async fn submit(&self, report: NewReport) -> Result<ThreatReport, LedgerError> {
        self.insert(report, ReportStatus::Pending).await
    }

    /// Trusted insertion path: keeps a caller-supplied status
    pub async fn add(&self, report: NewReport) -> Result<ThreatReport, LedgerError> {
        let status = report.status.unwrap_or_default();
        self.insert(report, status).await
    }

    /// Flip `pending -> approved`. Returns whether a report changed;
    /// unknown ids are a no-op.
    pub async fn approve(&self, id: i64) -> Result<bool, LedgerError> {
        let _guard = self.lock.lock().await;
        let mut reports = self.load().await?;

        let Some(report) = reports.iter_mut().find(|r| r.id == id) else {
            tracing::debug!("Approve ignored, no report {}", id);
            return Ok(false);
        };
        if report.status == ReportStatus::Approved {
            return Ok(false);
        }
        report.status = ReportStatus::Approved;

        self.save(&reports).await?;
        tracing::info!("Report {} approved", id);
        Ok(true)
    }

    /// Remove every report with this id. Returns how many were removed.
    pub async fn delete(&self, id: i64) -> Result<usize, LedgerError> {
        let _guard = self.lock.lock().await;
        let mut reports = self.load().await?;

        let before = reports.len();
        reports.retain(|r| r.id != id);
        let removed = before - reports.len();
        if removed == 0 {
            tracing::debug!("Delete ignored, no report {}", id);
            return Ok(0);
        }

        self.save(&reports).await?;
        tracing::info!("Report {} deleted", id);
        Ok(removed)
    }

    async fn insert(&self, report: NewReport, status: ReportStatus) -> Result<ThreatReport, LedgerError> {
        let report = report.normalized();
        report
            .validate()
            .map_err(|e| LedgerError::Invalid(e.to_string()))?;

        let _guard = self.lock.lock().await;
        let mut reports = self.load().await?;

        let now = Utc::now().timestamp_millis();
        let id = next_id(now, &reports);

        let report = ThreatReport {
            id,
            target: report.target,
            description: report.description,
            status,
            reporter_wallet: report
                .reporter_wallet
                .unwrap_or_else(|| ANONYMOUS_REPORTER.to_string()),
            img: report.img,
            created_at: now,
        };

        reports.insert(0, report.clone());
        self.save(&reports).await?;

        tracing::info!("Report {} filed against {} ({})", report.id, report.target, report.status.as_str());
        Ok(report)
    }

    /// Caller must hold the lock
    async fn load(&self) -> Result<Vec<ThreatReport>, LedgerError> {
        let raw = self.store.load().await.map_err(LedgerError::Unreadable)?;

        match parse_contents(raw) {
            Contents::Reports(reports) => Ok(reports),
            Contents::Missing => {
                tracing::warn!("Ledger store {} is empty, initializing", self.store.describe());
                self.repair().await;
                Ok(Vec::new())
            }
            Contents::Blank => {
                tracing::warn!("Ledger store {} is blank, resetting", self.store.describe());
                self.repair().await;
                Ok(Vec::new())
            }
            Contents::Corrupt(e) => {
                tracing::warn!("Ledger store {} is corrupt ({}), resetting", self.store.describe(), e);
                self.repair().await;
                Ok(Vec::new())
            }
        }
    }

    /// Best effort: the next successful save repairs the store anyway
    async fn repair(&self) {
        if let Err(e) = self.store.save(EMPTY_LEDGER.to_vec()).await {
            tracing::error!("Ledger repair failed on {}: {}", self.store.describe(), e);
        }
    }

    /// Caller must hold the lock
    async fn save(&self, reports: &[ThreatReport]) -> Result<(), LedgerError> {
        let content = serde_json::to_vec_pretty(reports)
            .map_err(|e| LedgerError::Write(e.into()))?;

        self.store.save(content).await.map_err(|e| {
            tracing::error!("Ledger write failed on {}: {}", self.store.describe(), e);
            LedgerError::Write(e)
        })
    }
}

/// Millisecond clock, bumped past the newest stored id
fn next_id(now_ms: i64, reports: &[ThreatReport]) -> i64 {
    let newest = reports.iter().map(|r| r.id).max().unwrap_or(i64::MIN);
    now_ms.max(newest.saturating_add(1))
}
