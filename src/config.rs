//! Configuration module

use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use crate::ledger::StorageBackend;
use crate::scoring::rules::DEFAULT_SIGNAL_TIMEOUT;
use crate::scoring::ScanMode;

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Server port
    pub port: u16,

    /// Which signal source backs `/scan`
    pub scan_mode: ScanMode,

    /// JSON-RPC endpoint for on-chain mode
    pub solana_rpc_url: String,

    /// Scam aggregator base URL for aggregator mode
    pub aggregator_url: String,

    /// Timeout for every outbound call, in seconds
    pub signal_timeout_secs: u64,

    /// Denylist entries on top of the built-in ones
    pub extra_blacklist: Vec<String>,

    /// Where threat reports are kept
    pub storage_backend: StorageBackend,

    /// File backend location
    pub reports_file: PathBuf,

    /// Remote document bin
    pub remote_store_url: Option<String>,
    pub remote_store_key: Option<String>,

    /// Environment (development, production)
    pub environment: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8000,
            scan_mode: ScanMode::Simulated,
            solana_rpc_url: "https://api.mainnet-beta.solana.com".to_string(),
            aggregator_url: "https://api.rugcheck.xyz".to_string(),
            signal_timeout_secs: DEFAULT_SIGNAL_TIMEOUT.as_secs(),
            extra_blacklist: Vec::new(),
            storage_backend: StorageBackend::File,
            reports_file: PathBuf::from("reports.json"),
            remote_store_url: None,
            remote_store_key: None,
            environment: "development".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from any key lookup
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        Self {
            port: lookup("PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.port),

            scan_mode: parse_or_default(lookup("SCAN_MODE"), defaults.scan_mode, "SCAN_MODE"),

            solana_rpc_url: lookup("SOLANA_RPC_URL").unwrap_or(defaults.solana_rpc_url),

            aggregator_url: lookup("AGGREGATOR_URL").unwrap_or(defaults.aggregator_url),

            signal_timeout_secs: lookup("SIGNAL_TIMEOUT_SECS")
                .and_then(|t| t.parse().ok())
                .filter(|t| *t > 0)
                .unwrap_or(defaults.signal_timeout_secs),

            extra_blacklist: lookup("EXTRA_BLACKLIST")
                .map(|list| {
                    list.split(',')
                        .map(str::trim)
                        .filter(|s| !s.is_empty())
                        .map(str::to_string)
                        .collect()
                })
                .unwrap_or_default(),

            storage_backend: parse_or_default(lookup("STORAGE_BACKEND"), defaults.storage_backend, "STORAGE_BACKEND"),

            reports_file: lookup("REPORTS_FILE")
                .map(PathBuf::from)
                .unwrap_or(defaults.reports_file),

            remote_store_url: lookup("REMOTE_STORE_URL").filter(|u| !u.is_empty()),

            remote_store_key: lookup("REMOTE_STORE_KEY").filter(|k| !k.is_empty()),

            environment: lookup("ENVIRONMENT").unwrap_or(defaults.environment),
        }
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

fn parse_or_default<T>(value: Option<String>, default: T, key: &str) -> T
where
    T: FromStr<Err = String>,
{
    match value {
        None => default,
        Some(raw) => raw.parse().unwrap_or_else(|e| {
            tracing::warn!("{}: {}, using default", key, e);
            default
        }),
    }
}
