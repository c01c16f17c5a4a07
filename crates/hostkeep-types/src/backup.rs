use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Metadata describing one backup file.
///
/// A backup is an immutable byte-for-byte snapshot of the hosts file; this
/// struct never holds the content itself.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackupMeta {
    pub filename: String,
    pub path: PathBuf,
    /// File size in bytes.
    pub size: u64,
    pub created: DateTime<Utc>,
}
