//! Backup file naming.
//!
//! Names look like `hosts-backup-2024-05-01T12-00-00-000Z.bak`: an ISO 8601
//! UTC timestamp with millisecond precision whose `:` and `.` separators are
//! replaced by `-`. A second backup within the same millisecond gets a
//! counter, `hosts-backup-2024-05-01T12-00-00-000Z-1.bak`.

use chrono::{DateTime, Utc};

pub const BACKUP_PREFIX: &str = "hosts-backup-";
pub const BACKUP_SUFFIX: &str = ".bak";

/// File name for a backup taken at `at`, with an optional collision counter.
pub fn backup_file_name(at: DateTime<Utc>, counter: u32) -> String {
    let stamp = at.format("%Y-%m-%dT%H-%M-%S-%3fZ");
    if counter == 0 {
        format!("{BACKUP_PREFIX}{stamp}{BACKUP_SUFFIX}")
    } else {
        format!("{BACKUP_PREFIX}{stamp}-{counter}{BACKUP_SUFFIX}")
    }
}

/// Returns `true` if `name` follows the backup naming convention.
pub fn is_backup_file_name(name: &str) -> bool {
    name.len() > BACKUP_PREFIX.len() + BACKUP_SUFFIX.len()
        && name.starts_with(BACKUP_PREFIX)
        && name.ends_with(BACKUP_SUFFIX)
}
