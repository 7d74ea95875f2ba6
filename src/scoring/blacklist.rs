//! Static denylist of known scam addresses

use std::collections::HashSet;

use crate::models::{Check, RiskLevel, ScanResult};

pub const KNOWN_SCAMS: &[&str] = &["ScamTokenAddress", "Honeypot123", "FakeUSDC"];

pub const BLACKLIST_SUMMARY: &str =
    "DANGER: Address identified in Global Blacklist. Do not interact.";

#[derive(Debug, Clone)]
pub struct Denylist {
    entries: HashSet<String>,
}

impl Denylist {
    /// Built-in entries plus any extras. Blank extras are ignored.
    pub fn new<I, S>(extra: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut entries: HashSet<String> = KNOWN_SCAMS.iter().map(|s| s.to_string()).collect();
        for entry in extra {
            let entry = entry.as_ref().trim();
            if !entry.is_empty() {
                entries.insert(entry.to_string());
            }
        }
        Self { entries }
    }

    /// Exact, case-sensitive match
    pub fn contains(&self, address: &str) -> bool {
        self.entries.contains(address)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Fixed verdict for a denylisted address
    pub fn verdict() -> ScanResult {
        ScanResult {
            score: 0,
            risk: RiskLevel::Critical,
            checks: Some(vec![
                Check::new("DATABASE", "BLACKLISTED", false),
                Check::new("SAFETY", "COMPROMISED", false),
            ]),
            summary: BLACKLIST_SUMMARY.to_string(),
        }
    }
}

impl Default for Denylist {
    fn default() -> Self {
        Self::new(std::iter::empty::<&str>())
    }
}
