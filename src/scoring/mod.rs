//! Scoring Engine
//!
//! Turns an address into exactly one [`ScanResult`]. Never fails: every
//! upstream problem degrades into an `UNKNOWN` or `ERROR` result.
//!
//! Evaluation order:
//! 1. Denylist (short-circuits, no network)
//! 2. One signal source, picked by deployment mode
//! 3. Tier from the final score
//! 4. Summary naming the most specific finding

pub mod rules;
pub mod blacklist;
pub mod simulated;
pub mod onchain;
pub mod aggregator;

use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

use crate::config::Config;
use crate::models::{Check, ScanResult};

pub use aggregator::AggregatorClient;
pub use blacklist::Denylist;
pub use onchain::OnChainClient;

// ============================================================================
// ERRORS
// ============================================================================

#[derive(Debug, Error)]
pub enum SignalError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Signal source timed out")]
    Timeout,

    #[error("Signal source returned status {0}")]
    Status(u16),

    #[error("Address not found")]
    NotFound,

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Invalid signal source URL: {0}")]
    InvalidUrl(String),
}

impl SignalError {
    pub fn from_reqwest(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            SignalError::Timeout
        } else {
            SignalError::Network(err.to_string())
        }
    }

    /// Result a caller sees for this failure
    pub fn degrade(&self) -> ScanResult {
        match self {
            SignalError::Parse(_) => {
                ScanResult::error("Analysis failed: signal source returned an unreadable response.")
            }
            _ => ScanResult::unknown(),
        }
    }
}

// ============================================================================
// MODE
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanMode {
    Simulated,
    OnChain,
    Aggregator,
}

impl ScanMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScanMode::Simulated => "simulated",
            ScanMode::OnChain => "onchain",
            ScanMode::Aggregator => "aggregator",
        }
    }
}

impl FromStr for ScanMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "simulated" | "simulation" => Ok(ScanMode::Simulated),
            "onchain" | "on-chain" | "rpc" => Ok(ScanMode::OnChain),
            "aggregator" | "rugcheck" => Ok(ScanMode::Aggregator),
            other => Err(format!("unknown scan mode '{}'", other)),
        }
    }
}

impl std::fmt::Display for ScanMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Exactly one signal source is active per deployment
pub enum SignalSource {
    Simulated,
    OnChain(OnChainClient),
    Aggregator(AggregatorClient),
}

impl SignalSource {
    pub fn mode(&self) -> ScanMode {
        match self {
            SignalSource::Simulated => ScanMode::Simulated,
            SignalSource::OnChain(_) => ScanMode::OnChain,
            SignalSource::Aggregator(_) => ScanMode::Aggregator,
        }
    }
}

// ============================================================================
// SCANNER
// ============================================================================

pub struct Scanner {
    denylist: Denylist,
    source: SignalSource,
}

impl Scanner {
    pub fn new(denylist: Denylist, source: SignalSource) -> Self {
        Self { denylist, source }
    }

    /// Simulated scanner with the built-in denylist
    pub fn simulated() -> Self {
        Self::new(Denylist::default(), SignalSource::Simulated)
    }

    pub fn from_config(config: &Config) -> Result<Self, SignalError> {
        let timeout = Duration::from_secs(config.signal_timeout_secs);
        let source = match config.scan_mode {
            ScanMode::Simulated => SignalSource::Simulated,
            ScanMode::OnChain => SignalSource::OnChain(OnChainClient::new(&config.solana_rpc_url, timeout)?),
            ScanMode::Aggregator => SignalSource::Aggregator(AggregatorClient::new(&config.aggregator_url, timeout)?),
        };

        Ok(Self::new(Denylist::new(&config.extra_blacklist), source))
    }

    pub fn mode(&self) -> ScanMode {
        self.source.mode()
    }

    pub fn denylist(&self) -> &Denylist {
        &self.denylist
    }

    /// Scan an already-trimmed address
    pub async fn scan(&self, address: &str) -> ScanResult {
        if self.denylist.contains(address) {
            tracing::info!("Blacklisted address scanned: {}", address);
            return Denylist::verdict();
        }

        let outcome = match &self.source {
            SignalSource::Simulated => Ok(simulated::scan(address)),
            SignalSource::OnChain(client) => client
                .fetch_authorities(address)
                .await
                .map(|authorities| onchain::score_authorities(&authorities)),
            SignalSource::Aggregator(client) => client
                .fetch_report(address)
                .await
                .map(|report| aggregator::score_report(&report)),
        };

        match outcome {
            Ok(result) => {
                tracing::debug!("Scanned {} ({}): score={} risk={}", address, self.mode(), result.score, result.risk);
                result
            }
            Err(e) => {
                tracing::warn!("Degraded scan for {} ({}): {}", address, self.mode(), e);
                e.degrade()
            }
        }
    }
}

/// First failing check in evaluation order
pub fn first_finding(checks: &[Check]) -> Option<&Check> {
    checks.iter().find(|c| !c.safe)
}
