use std::io;
use std::path::PathBuf;

/// Errors from backing-file access.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The hosts file is missing or unreadable.
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The hosts file could not be overwritten.
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Storage backend is read-only.
    #[error("store is read-only")]
    ReadOnly,
}

impl StoreError {
    /// Returns `true` for faults raised while writing.
    pub fn is_write(&self) -> bool {
        matches!(self, Self::Write { .. } | Self::ReadOnly)
    }
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
