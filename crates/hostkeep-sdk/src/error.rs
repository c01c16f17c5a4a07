use std::path::PathBuf;

use hostkeep_backup::BackupError;
use hostkeep_history::{Direction, HistoryError};
use hostkeep_store::StoreError;
use hostkeep_types::TypeError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum HostsError {
    #[error("initialization failed for {}: {reason}", path.display())]
    Init { path: PathBuf, reason: String },

    #[error("invalid config {}: {reason}", path.display())]
    Config { path: PathBuf, reason: String },

    #[error("read error: {0}")]
    Read(StoreError),

    #[error("write error: {0}")]
    Write(StoreError),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("nothing to {0}")]
    NoHistory(Direction),

    #[error("backup error: {0}")]
    Backup(BackupError),

    #[error("failed to list backups: {0}")]
    List(BackupError),

    #[error("invalid fields: {0}")]
    InvalidFields(#[from] TypeError),
}

impl HostsError {
    /// Stable name of the failure class, as surfaced to operators.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Init { .. } | Self::Config { .. } => "InitError",
            Self::Read(_) => "ReadError",
            Self::Write(_) => "WriteError",
            Self::NotFound(_) => "NotFound",
            Self::NoHistory(_) => "NoHistory",
            Self::Backup(_) => "BackupError",
            Self::List(_) => "ListError",
            Self::InvalidFields(_) => "InvalidFields",
        }
    }

    /// Human-readable detail message.
    pub fn details(&self) -> String {
        match self {
            Self::Init { reason, .. } | Self::Config { reason, .. } => reason.clone(),
            Self::Read(e) | Self::Write(e) => e.to_string(),
            Self::NotFound(what) => what.clone(),
            Self::NoHistory(direction) => format!("nothing to {direction}"),
            Self::Backup(e) | Self::List(e) => e.to_string(),
            Self::InvalidFields(e) => e.to_string(),
        }
    }
}

impl From<StoreError> for HostsError {
    fn from(err: StoreError) -> Self {
        if err.is_write() {
            Self::Write(err)
        } else {
            Self::Read(err)
        }
    }
}

impl From<HistoryError> for HostsError {
    fn from(err: HistoryError) -> Self {
        match err {
            HistoryError::NoHistory(direction) => Self::NoHistory(direction),
            HistoryError::NotFound(id) => Self::NotFound(format!("record {id}")),
            HistoryError::NotApplied => Self::NotFound("command was never applied".into()),
            HistoryError::Store(e) => e.into(),
        }
    }
}

impl From<BackupError> for HostsError {
    fn from(err: BackupError) -> Self {
        match err {
            BackupError::NotFound(path) => Self::NotFound(format!("backup {}", path.display())),
            BackupError::List { .. } => Self::List(err),
            other => Self::Backup(other),
        }
    }
}

pub type SdkResult<T> = Result<T, HostsError>;
