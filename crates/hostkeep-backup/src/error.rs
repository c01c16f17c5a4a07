//! Error types for the backup crate.

use std::io;
use std::path::PathBuf;

/// Errors that can occur while managing backups.
#[derive(Debug, thiserror::Error)]
pub enum BackupError {
    /// The backup directory could not be created.
    #[error("failed to create backup directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A backup file could not be written.
    #[error("failed to write backup {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A backup file could not be read.
    #[error("failed to read backup {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A backup file could not be removed.
    #[error("failed to remove backup {path}: {source}")]
    Remove {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The backup directory could not be enumerated.
    #[error("failed to list backups in {path}: {source}")]
    List {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The named backup does not exist.
    #[error("backup not found: {}", .0.display())]
    NotFound(PathBuf),

    /// Reading or overwriting the live hosts file failed.
    #[error("store error: {0}")]
    Store(#[from] hostkeep_store::StoreError),
}

/// Convenience alias for backup results.
pub type BackupResult<T> = Result<T, BackupError>;
