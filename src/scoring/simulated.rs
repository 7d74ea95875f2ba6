//! Simulated scan
//!
//! Deterministic stand-in for live signals: the same address always maps to
//! the same value, checks and score.

use sha2::{Digest, Sha256};

use super::rules::{
    clamp_score, LIQUIDITY_LOCKED_ABOVE, LIQUIDITY_UNLOCKED_PENALTY, MINT_DISABLED_ABOVE,
    MINT_ENABLED_PENALTY, NEUTRAL_HASH_VALUE, SIMULATED_BUCKETS,
};
use super::first_finding;
use crate::models::{Check, RiskLevel, ScanResult};

/// Outcome of hashing an address into a bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HashValue {
    Hashed(u8),
    /// Nothing to hash; the neutral value is used instead
    Neutral,
}

impl HashValue {
    pub fn value(self) -> u8 {
        match self {
            HashValue::Hashed(v) => v,
            HashValue::Neutral => NEUTRAL_HASH_VALUE,
        }
    }
}

/// SHA-256 of the address read as a big-endian integer, mod 100
pub fn hash_value(address: &str) -> HashValue {
    if address.is_empty() {
        return HashValue::Neutral;
    }

    let digest = Sha256::digest(address.as_bytes());
    let bucket = digest
        .iter()
        .fold(0u32, |acc, byte| (acc * 256 + u32::from(*byte)) % SIMULATED_BUCKETS);

    HashValue::Hashed(bucket as u8)
}

pub fn scan(address: &str) -> ScanResult {
    let hashed = hash_value(address);
    if hashed == HashValue::Neutral {
        tracing::warn!("Nothing to hash for address, using neutral value {}", NEUTRAL_HASH_VALUE);
    }
    score_value(hashed.value())
}

/// Build the result for an already-hashed value
pub fn score_value(value: u8) -> ScanResult {
    let liquidity_locked = value > LIQUIDITY_LOCKED_ABOVE;
    let mint_disabled = value > MINT_DISABLED_ABOVE;

    let checks = vec![
        Check::new(
            "LIQUIDITY",
            if liquidity_locked { "LOCKED" } else { "UNLOCKED" },
            liquidity_locked,
        ),
        Check::new(
            "MINT AUTH",
            if mint_disabled { "DISABLED" } else { "ENABLED" },
            mint_disabled,
        ),
    ];

    let mut raw = i64::from(value);
    if !liquidity_locked {
        raw -= LIQUIDITY_UNLOCKED_PENALTY;
    }
    if !mint_disabled {
        raw -= MINT_ENABLED_PENALTY;
    }

    let score = clamp_score(raw);
    let risk = RiskLevel::from_score(score);

    let summary = match first_finding(&checks) {
        Some(check) => format!(
            "AI Scan flagged {}: {}. Risk level assessed as {}.",
            check.name, check.status, risk
        ),
        None => format!(
            "AI Scan completed. Risk level assessed as {} based on simulated vectors.",
            risk
        ),
    };

    ScanResult {
        score,
        risk,
        checks: Some(checks),
        summary,
    }
}
