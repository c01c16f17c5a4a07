//! Error types for the history crate.

use std::fmt;

use hostkeep_types::RecordId;

/// Which stack an operation drew from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Undo,
    Redo,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Undo => f.write_str("undo"),
            Self::Redo => f.write_str("redo"),
        }
    }
}

/// Errors that can occur while running or replaying commands.
#[derive(Debug, thiserror::Error)]
pub enum HistoryError {
    /// The relevant stack is empty.
    #[error("nothing to {0}")]
    NoHistory(Direction),

    /// The record a command targets is not in the file.
    #[error("record not found: {0}")]
    NotFound(RecordId),

    /// An update was rolled back before it was ever executed.
    #[error("command has not been executed")]
    NotApplied,

    /// Store operation failed.
    #[error("store error: {0}")]
    Store(#[from] hostkeep_store::StoreError),
}

/// Convenience alias for history results.
pub type HistoryResult<T> = Result<T, HistoryError>;
