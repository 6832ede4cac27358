//! Error types for record persistence and backfill.

use uposatha_search::SearchError;

/// Errors from the record store and its backends.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum StoreError {
    /// Backend read or write failed.
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// Stored or imported data is not valid record JSON.
    #[error("corrupt record data: {0}")]
    Corrupt(#[from] serde_json::Error),
    /// A record violates a field constraint.
    #[error("invalid record: {0}")]
    InvalidRecord(String),
    /// Backup payload rejected before restore.
    #[error("unsupported backup: {0}")]
    UnsupportedBackup(String),
}

/// Errors from the gap-backfill synchronizer.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum SyncError {
    #[error("classification failed: {0}")]
    Search(#[from] SearchError),
    #[error("record store failed: {0}")]
    Store(#[from] StoreError),
}
