//! Reversible commands.

use std::fmt;

use hostkeep_format::IdMap;
use hostkeep_types::{Record, RecordId, RecordPatch};

/// The four kinds of reversible change.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CommandKind {
    Add,
    Update,
    Delete,
    DeleteBatch,
}

impl fmt::Display for CommandKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Add => "add",
            Self::Update => "update",
            Self::Delete => "delete",
            Self::DeleteBatch => "delete-batch",
        };
        f.write_str(name)
    }
}

/// A reversible change to the hosts file.
///
/// Commands are pure data. They hold no reference to a store; [`execute`]
/// and [`rollback`] run them against whichever store is passed in, re-reading
/// the file first. Fields marked as captured are filled in by execution,
/// because only the fresh read knows what was actually changed.
///
/// [`execute`]: crate::execute
/// [`rollback`]: crate::rollback
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// Append one domain record on a new trailing line.
    Add {
        /// The new record, carrying its minted id.
        record: Record,
        /// Captured: the id the record carries in the file.
        persisted: Option<RecordId>,
    },
    /// Merge a patch over one record.
    Update {
        /// Id of the record to change while the change is not applied.
        target: RecordId,
        patch: RecordPatch,
        /// Captured: the record as it was just before the patch.
        previous: Option<Record>,
        /// Captured: the id of the patched record while applied.
        current: Option<RecordId>,
    },
    /// Remove one record.
    Delete {
        /// Snapshot restored on rollback; refreshed from the file on execution.
        record: Record,
        /// Id of the record to remove while the removal is not applied.
        target: RecordId,
    },
    /// Remove a set of records.
    DeleteBatch {
        /// Ids to remove while the removal is not applied.
        targets: Vec<RecordId>,
        /// Captured: the records actually removed by the last execution.
        removed: Vec<Record>,
    },
}

impl Command {
    pub fn add(record: Record) -> Self {
        Self::Add {
            record,
            persisted: None,
        }
    }

    pub fn update(target: RecordId, patch: RecordPatch) -> Self {
        Self::Update {
            target,
            patch,
            previous: None,
            current: None,
        }
    }

    pub fn delete(record: Record) -> Self {
        let target = record.id.clone();
        Self::Delete { record, target }
    }

    pub fn delete_batch(targets: Vec<RecordId>) -> Self {
        Self::DeleteBatch {
            targets,
            removed: Vec::new(),
        }
    }

    pub fn kind(&self) -> CommandKind {
        match self {
            Self::Add { .. } => CommandKind::Add,
            Self::Update { .. } => CommandKind::Update,
            Self::Delete { .. } => CommandKind::Delete,
            Self::DeleteBatch { .. } => CommandKind::DeleteBatch,
        }
    }

    /// Follow a rewrite of the file.
    ///
    /// Only ids that name a record currently in the file are touched: the
    /// records a command would reverse while `applied`, or the records it
    /// would change again while undone.
    pub(crate) fn remap(&mut self, map: &IdMap, applied: bool) {
        match self {
            Self::Add { persisted, .. } => {
                if applied {
                    if let Some(id) = persisted {
                        map.remap(id);
                    }
                }
            }
            Self::Update {
                target, current, ..
            } => {
                if applied {
                    if let Some(id) = current {
                        map.remap(id);
                    }
                } else {
                    map.remap(target);
                }
            }
            Self::Delete { target, .. } => {
                if !applied {
                    map.remap(target);
                }
            }
            Self::DeleteBatch { targets, .. } => {
                if !applied {
                    for id in targets {
                        map.remap(id);
                    }
                }
            }
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Add { record, .. } => write!(f, "add {} {}", record.ip, record.domain),
            Self::Update { target, .. } => write!(f, "update {target}"),
            Self::Delete { target, .. } => write!(f, "delete {target}"),
            Self::DeleteBatch { targets, .. } => write!(f, "delete {} records", targets.len()),
        }
    }
}
