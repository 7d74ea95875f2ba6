//! Persistence backends for the report ledger
//!
//! A store only moves bytes. Parsing and repair belong to the ledger, so
//! every backend behaves the same way when its content is absent or corrupt.

use std::path::PathBuf;
use std::str::FromStr;
use thiserror::Error;
use tokio::sync::Mutex;

use super::file::FileStore;
use super::remote::RemoteStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Store returned status {0}")]
    Status(u16),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Load/save capability behind the ledger
#[allow(async_fn_in_trait)]
pub trait ReportStore {
    /// `Ok(None)` when nothing has been stored yet
    async fn load(&self) -> Result<Option<Vec<u8>>, StoreError>;

    /// Replace the stored content wholly
    async fn save(&self, content: Vec<u8>) -> Result<(), StoreError>;

    fn describe(&self) -> String;
}

// ============================================================================
// MEMORY
// ============================================================================

/// Process memory only. Lost on restart.
#[derive(Debug, Default)]
pub struct MemoryStore {
    content: Mutex<Option<Vec<u8>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeded with raw content, e.g. to exercise repair
    pub fn with_content(content: impl Into<Vec<u8>>) -> Self {
        Self {
            content: Mutex::new(Some(content.into())),
        }
    }
}

impl ReportStore for MemoryStore {
    async fn load(&self) -> Result<Option<Vec<u8>>, StoreError> {
        Ok(self.content.lock().await.clone())
    }

    async fn save(&self, content: Vec<u8>) -> Result<(), StoreError> {
        *self.content.lock().await = Some(content);
        Ok(())
    }

    fn describe(&self) -> String {
        "memory".to_string()
    }
}

// ============================================================================
// RUNTIME SELECTION
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    Memory,
    File,
    Remote,
}

impl StorageBackend {
    pub fn as_str(&self) -> &'static str {
        match self {
            StorageBackend::Memory => "memory",
            StorageBackend::File => "file",
            StorageBackend::Remote => "remote",
        }
    }
}

impl FromStr for StorageBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "memory" | "mem" => Ok(StorageBackend::Memory),
            "file" | "json" => Ok(StorageBackend::File),
            "remote" | "jsonbin" | "http" => Ok(StorageBackend::Remote),
            other => Err(format!("unknown storage backend '{}'", other)),
        }
    }
}

/// Store chosen at startup from configuration
pub enum AnyStore {
    Memory(MemoryStore),
    File(FileStore),
    Remote(RemoteStore),
}

impl AnyStore {
    pub fn memory() -> Self {
        AnyStore::Memory(MemoryStore::new())
    }

    pub fn file(path: impl Into<PathBuf>) -> Self {
        AnyStore::File(FileStore::new(path))
    }
}

impl ReportStore for AnyStore {
    async fn load(&self) -> Result<Option<Vec<u8>>, StoreError> {
        match self {
            AnyStore::Memory(store) => store.load().await,
            AnyStore::File(store) => store.load().await,
            AnyStore::Remote(store) => store.load().await,
        }
    }

    async fn save(&self, content: Vec<u8>) -> Result<(), StoreError> {
        match self {
            AnyStore::Memory(store) => store.save(content).await,
            AnyStore::File(store) => store.save(content).await,
            AnyStore::Remote(store) => store.save(content).await,
        }
    }

    fn describe(&self) -> String {
        match self {
            AnyStore::Memory(store) => store.describe(),
            AnyStore::File(store) => store.describe(),
            AnyStore::Remote(store) => store.describe(),
        }
    }
}
