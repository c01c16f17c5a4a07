//! High-level SDK for hostkeep.
//!
//! Provides one entry point, [`HostsService`], over a hosts file: record
//! listing, add/update/delete with linear undo and redo, and byte-for-byte
//! backups. This is what shells and embedding applications talk to.
//!
//! Every operation returns an explicit [`SdkResult`]; failures carry a
//! stable class name via [`HostsError::kind`].

pub mod config;
pub mod error;
pub mod service;

pub use config::{default_backup_dir, default_hosts_path, ServiceConfig};
pub use error::{HostsError, SdkResult};
pub use service::HostsService;

// Re-export key types
pub use hostkeep_backup::{BackupDiff, BackupManager, DiffLine};
pub use hostkeep_format::LineEnding;
pub use hostkeep_history::{CommandKind, Direction};
pub use hostkeep_store::{FileHostsStore, HostsStore, InMemoryHostsStore};
pub use hostkeep_types::{BackupMeta, HostFields, Record, RecordId, RecordPatch};
