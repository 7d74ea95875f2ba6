//! Scan model
//!
//! Request/response shapes for `POST /scan` and the risk tier ladder.

use serde::{Deserialize, Serialize};

use crate::scoring::rules::{LOW_RISK_MIN_SCORE, MEDIUM_RISK_MIN_SCORE};

// ============================================================================
// RISK LEVEL
// ============================================================================

/// Coarse risk tier attached to every scan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RiskLevel {
    #[serde(alias = "SAFE")]
    Low,
    #[serde(alias = "WARNING")]
    Medium,
    High,
    Critical,
    /// Signal source could not describe the address
    Unknown,
    /// Scan pipeline failed
    Error,
}

impl RiskLevel {
    /// Tier for a safety score. Cut points belong to the safer band.
    pub fn from_score(score: u8) -> Self {
        if score >= LOW_RISK_MIN_SCORE {
            RiskLevel::Low
        } else if score >= MEDIUM_RISK_MIN_SCORE {
            RiskLevel::Medium
        } else {
            RiskLevel::High
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "LOW",
            RiskLevel::Medium => "MEDIUM",
            RiskLevel::High => "HIGH",
            RiskLevel::Critical => "CRITICAL",
            RiskLevel::Unknown => "UNKNOWN",
            RiskLevel::Error => "ERROR",
        }
    }

    /// 0 = safest. Out-of-band states rank with the worst tiers.
    pub fn severity_level(&self) -> u8 {
        match self {
            RiskLevel::Low => 0,
            RiskLevel::Medium => 1,
            RiskLevel::High => 2,
            RiskLevel::Critical | RiskLevel::Unknown | RiskLevel::Error => 3,
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// SCAN RESULT
// ============================================================================

/// A single sub-check reported by a signal source
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Check {
    pub name: String,
    pub status: String,
    pub safe: bool,
}

impl Check {
    pub fn new(name: impl Into<String>, status: impl Into<String>, safe: bool) -> Self {
        Self {
            name: name.into(),
            status: status.into(),
            safe,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanResult {
    /// Safety score, 0-100, higher = safer
    pub score: u8,
    pub risk: RiskLevel,
    /// Evaluation order is significant for summary selection
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub checks: Option<Vec<Check>>,
    pub summary: String,
}

impl ScanResult {
    /// Signal source unreachable, timed out, or the address does not exist
    pub fn unknown() -> Self {
        Self {
            score: 0,
            risk: RiskLevel::Unknown,
            checks: None,
            summary: "Token not found on-chain or too new to analyze.".to_string(),
        }
    }

    /// Scan pipeline fault
    pub fn error(summary: impl Into<String>) -> Self {
        Self {
            score: 0,
            risk: RiskLevel::Error,
            checks: None,
            summary: summary.into(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ScanRequest {
    #[serde(default)]
    pub address: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_boundaries_belong_to_safer_band() {
        assert_eq!(RiskLevel::from_score(100), RiskLevel::Low);
        assert_eq!(RiskLevel::from_score(80), RiskLevel::Low);
        assert_eq!(RiskLevel::from_score(79), RiskLevel::Medium);
        assert_eq!(RiskLevel::from_score(50), RiskLevel::Medium);
        assert_eq!(RiskLevel::from_score(49), RiskLevel::High);
        assert_eq!(RiskLevel::from_score(0), RiskLevel::High);
    }

    #[test]
    fn test_tier_is_monotonic() {
        for low in 0..=100u8 {
            for high in low..=100u8 {
                assert!(
                    RiskLevel::from_score(low).severity_level()
                        >= RiskLevel::from_score(high).severity_level(),
                    "tier({}) is safer than tier({})", low, high
                );
            }
        }
    }

    #[test]
    fn test_risk_serializes_uppercase_and_accepts_aliases() {
        assert_eq!(serde_json::to_string(&RiskLevel::Critical).unwrap(), "\"CRITICAL\"");
        let safe: RiskLevel = serde_json::from_str("\"SAFE\"").unwrap();
        let warning: RiskLevel = serde_json::from_str("\"WARNING\"").unwrap();
        assert_eq!(safe, RiskLevel::Low);
        assert_eq!(warning, RiskLevel::Medium);
    }

    #[test]
    fn test_checks_omitted_when_absent() {
        let json = serde_json::to_value(ScanResult::unknown()).unwrap();
        assert!(json.get("checks").is_none());
        assert_eq!(json["risk"], "UNKNOWN");
        assert_eq!(json["score"], 0);
        assert!(!json["summary"].as_str().unwrap().is_empty());
    }
}
