//! Scoring Rules & Thresholds
//!
//! Constants only. Scoring logic lives in the sibling modules.

use std::time::Duration;

// ============================================================================
// TIER CUT POINTS
// ============================================================================

/// At or above this score = LOW risk
pub const LOW_RISK_MIN_SCORE: u8 = 80;

/// At or above this score = MEDIUM risk, below = HIGH
pub const MEDIUM_RISK_MIN_SCORE: u8 = 50;

pub const MAX_SCORE: i64 = 100;

// ============================================================================
// SIMULATED MODE
// ============================================================================

/// Hash bucket count (value range is [0, 100))
pub const SIMULATED_BUCKETS: u32 = 100;

/// Used when the address yields nothing to hash
pub const NEUTRAL_HASH_VALUE: u8 = 50;

/// Liquidity counts as locked above this value
pub const LIQUIDITY_LOCKED_ABOVE: u8 = 20;

/// Mint counts as disabled above this value
pub const MINT_DISABLED_ABOVE: u8 = 30;

pub const LIQUIDITY_UNLOCKED_PENALTY: i64 = 30;
pub const MINT_ENABLED_PENALTY: i64 = 40;

// ============================================================================
// ON-CHAIN MODE
// ============================================================================

/// Mint authority can inflate supply, so it costs more than freeze
pub const MINT_AUTHORITY_PENALTY: i64 = 40;
pub const FREEZE_AUTHORITY_PENALTY: i64 = 20;

// ============================================================================
// AGGREGATOR MODE
// ============================================================================

/// Danger points per safety point
pub const DANGER_DIVISOR: f64 = 100.0;

// ============================================================================
// NETWORK
// ============================================================================

pub const DEFAULT_SIGNAL_TIMEOUT: Duration = Duration::from_secs(10);

/// Clamp any raw score into [0, 100]
pub fn clamp_score(raw: i64) -> u8 {
    raw.clamp(0, MAX_SCORE) as u8
}
