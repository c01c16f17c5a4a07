//! Running commands forward and backward against a store.
//!
//! Both directions follow the same cycle: re-read the file, edit the fresh
//! records, write the whole file once. Nothing is written when the edit
//! fails. Each successful run returns the [`IdMap`] produced by its write.

use std::collections::BTreeSet;

use hostkeep_format::IdMap;
use hostkeep_store::HostsStore;
use hostkeep_types::{Record, RecordId};
use tracing::{debug, warn};

use crate::command::Command;
use crate::edits::{self, LineFields};
use crate::error::{HistoryError, HistoryResult};

/// Apply `command` forward.
pub fn execute(command: &mut Command, store: &dyn HostsStore) -> HistoryResult<IdMap> {
    let mut records = store.read_all()?;

    let map = match command {
        Command::Add { record, persisted } => {
            let id = edits::append(&mut records, record.clone());
            let map = store.write_all(&records)?;
            *persisted = Some(map.resolve(&id));
            map
        }
        Command::Update {
            target,
            patch,
            previous,
            current,
        } => {
            let index = edits::position(&records, target)
                .ok_or_else(|| HistoryError::NotFound(target.clone()))?;
            let before = records[index].clone();

            let mut fields = LineFields::of(&before);
            if let Some(ip) = &patch.ip {
                fields.ip = ip.clone();
            }
            if let Some(domain) = &patch.domain {
                fields.domain = domain.clone();
            }
            if let Some(comment) = &patch.comment {
                fields.comment = comment.clone();
            }
            edits::rewrite(&mut records, index, fields, None);

            let map = store.write_all(&records)?;
            *current = Some(map.resolve(target));
            *previous = Some(before);
            map
        }
        Command::Delete { record, target } => {
            let removed = edits::remove(&mut records, &BTreeSet::from([target.clone()]));
            let map = store.write_all(&records)?;
            match removed.into_iter().next() {
                Some(found) => *record = found,
                None => warn!(%target, "record to delete was already gone"),
            }
            map
        }
        Command::DeleteBatch { targets, removed } => {
            let ids: BTreeSet<RecordId> = targets.iter().cloned().collect();
            let taken = edits::remove(&mut records, &ids);
            let map = store.write_all(&records)?;
            if taken.len() < ids.len() {
                debug!(requested = ids.len(), removed = taken.len(), "some records were already gone");
            }
            *removed = taken;
            map
        }
    };

    debug!(command = %command, "command executed");
    Ok(map)
}

/// Reverse `command`.
pub fn rollback(command: &mut Command, store: &dyn HostsStore) -> HistoryResult<IdMap> {
    let mut records = store.read_all()?;

    let map = match command {
        Command::Add { record, persisted } => {
            let id = persisted.clone().unwrap_or_else(|| record.id.clone());
            let removed = edits::remove(&mut records, &BTreeSet::from([id.clone()]));
            if removed.is_empty() {
                warn!(%id, "added record was already gone");
            }
            let map = store.write_all(&records)?;
            *persisted = None;
            map
        }
        Command::Update {
            target,
            previous,
            current,
            ..
        } => {
            let Some(before) = previous.as_ref() else {
                return Err(HistoryError::NotApplied);
            };
            let id = current.clone().unwrap_or_else(|| target.clone());
            let index =
                edits::position(&records, &id).ok_or_else(|| HistoryError::NotFound(id.clone()))?;
            edits::rewrite(&mut records, index, LineFields::of(before), Some(before.line_number));

            let map = store.write_all(&records)?;
            *target = map.resolve(&id);
            *current = None;
            map
        }
        Command::Delete { record, target } => {
            let (map, ids) = write_restored(store, records, std::slice::from_ref(record))?;
            if let Some(id) = ids.into_iter().next() {
                *target = id;
            }
            map
        }
        Command::DeleteBatch { targets, removed } => {
            let (map, ids) = write_restored(store, records, removed)?;
            *targets = ids;
            map
        }
    };

    debug!(command = %command, "command rolled back");
    Ok(map)
}

/// Restore `snapshots` into `records`, write, and report the ids the
/// restored records now carry.
///
/// Snapshots go in under placeholder ids so they cannot be confused with a
/// live record that happens to reuse their old positional id.
fn write_restored(
    store: &dyn HostsStore,
    mut records: Vec<Record>,
    snapshots: &[Record],
) -> HistoryResult<(IdMap, Vec<RecordId>)> {
    let placeholders: Vec<RecordId> = (0..snapshots.len())
        .map(|i| RecordId::new(format!("restore-{i}")))
        .collect();
    let restored = snapshots
        .iter()
        .zip(&placeholders)
        .map(|(snapshot, placeholder)| Record {
            id: placeholder.clone(),
            ..snapshot.clone()
        })
        .collect();
    edits::restore(&mut records, restored);

    let map = store.write_all(&records)?;
    let ids = placeholders.iter().map(|p| map.resolve(p)).collect();
    Ok((map, ids))
}
