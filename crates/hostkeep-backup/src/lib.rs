//! Hosts file backups for hostkeep.
//!
//! A backup is an immutable byte-for-byte copy of the live hosts file,
//! stored under a dedicated directory with a timestamped name (see
//! [`naming`]). The [`BackupManager`] creates, lists, restores, prunes and
//! previews them. It does not know about undo history; callers that restore
//! a backup are responsible for discarding any history that predates it.
//!
//! # Key Types
//!
//! - [`BackupManager`] -- operations over one backup directory
//! - [`BackupDiff`] / [`DiffHunk`] / [`DiffLine`] -- restore preview

pub mod diff;
pub mod error;
pub mod manager;
pub mod naming;

pub use diff::{diff_contents, BackupDiff, DiffHunk, DiffLine};
pub use error::{BackupError, BackupResult};
pub use manager::BackupManager;
pub use naming::{backup_file_name, is_backup_file_name, BACKUP_PREFIX, BACKUP_SUFFIX};
