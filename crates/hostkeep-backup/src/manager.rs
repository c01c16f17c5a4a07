use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use hostkeep_store::HostsStore;
use hostkeep_types::{BackupMeta, Clock, SystemClock};
use tempfile::NamedTempFile;
use tracing::{debug, info, warn};

use crate::diff::{diff_contents, BackupDiff};
use crate::error::{BackupError, BackupResult};
use crate::naming::{backup_file_name, is_backup_file_name};

/// Manages byte-for-byte snapshots of the hosts file in one directory.
///
/// The manager never parses the hosts file: backups copy raw bytes out and
/// restores copy them back verbatim.
#[derive(Clone)]
pub struct BackupManager {
    dir: PathBuf,
    clock: Arc<dyn Clock>,
}

impl BackupManager {
    /// Manager over `dir`, naming backups from the wall clock.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self::with_clock(dir, Arc::new(SystemClock))
    }

    pub fn with_clock(dir: impl Into<PathBuf>, clock: Arc<dyn Clock>) -> Self {
        Self {
            dir: dir.into(),
            clock,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Create the backup directory if it is missing. Safe to call repeatedly.
    pub fn ensure_dir(&self) -> BackupResult<()> {
        fs::create_dir_all(&self.dir).map_err(|source| BackupError::CreateDir {
            path: self.dir.clone(),
            source,
        })
    }

    /// Snapshot the live file and return the new backup's path.
    ///
    /// The bytes are staged under a temporary name and only take a backup
    /// name once fully written and synced.
    pub fn create(&self, store: &dyn HostsStore) -> BackupResult<PathBuf> {
        let bytes = store.read_raw()?;
        self.ensure_dir()?;
        let mut staged = self.stage(&bytes)?;

        let at = self.clock.now();
        let mut counter = 0;
        loop {
            let path = self.dir.join(backup_file_name(at, counter));
            match staged.persist_noclobber(&path) {
                Ok(_) => {
                    info!(path = %path.display(), size = bytes.len(), "backup created");
                    return Ok(path);
                }
                Err(err) if err.error.kind() == io::ErrorKind::AlreadyExists => {
                    debug!(path = %path.display(), "backup name taken");
                    staged = err.file;
                    counter += 1;
                }
                Err(err) => {
                    return Err(BackupError::Write {
                        path,
                        source: err.error,
                    })
                }
            }
        }
    }

    /// Write `bytes` to a hidden staging file in the backup directory.
    /// The file is removed when dropped without being persisted.
    fn stage(&self, bytes: &[u8]) -> BackupResult<NamedTempFile> {
        let write_err = |source| BackupError::Write {
            path: self.dir.clone(),
            source,
        };
        let mut staged = tempfile::Builder::new()
            .prefix(".staging-")
            .tempfile_in(&self.dir)
            .map_err(write_err)?;
        staged
            .write_all(bytes)
            .and_then(|()| staged.as_file().sync_all())
            .map_err(write_err)?;
        Ok(staged)
    }

    /// Copy the backup at `path` back over the live file.
    pub fn restore(&self, path: &Path, store: &dyn HostsStore) -> BackupResult<()> {
        let bytes = self.read_backup(path)?;
        store.write_raw(&bytes)?;
        info!(path = %path.display(), size = bytes.len(), "backup restored");
        Ok(())
    }

    /// Every backup in the directory, newest first.
    ///
    /// A directory that does not exist yet has no backups.
    pub fn list(&self) -> BackupResult<Vec<BackupMeta>> {
        let list_err = |source| BackupError::List {
            path: self.dir.clone(),
            source,
        };

        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(list_err(err)),
        };

        let mut backups = Vec::new();
        for entry in entries {
            let entry = entry.map_err(list_err)?;
            let filename = entry.file_name().to_string_lossy().into_owned();
            if !is_backup_file_name(&filename) {
                continue;
            }
            let metadata = entry.metadata().map_err(list_err)?;
            if !metadata.is_file() {
                continue;
            }
            let created = metadata
                .created()
                .or_else(|_| metadata.modified())
                .map_err(list_err)?;
            backups.push(BackupMeta {
                filename,
                path: entry.path(),
                size: metadata.len(),
                created: DateTime::<Utc>::from(created),
            });
        }

        backups.sort_by(|a, b| {
            b.created
                .cmp(&a.created)
                .then_with(|| b.filename.cmp(&a.filename))
        });
        debug!(dir = %self.dir.display(), count = backups.len(), "backups listed");
        Ok(backups)
    }

    /// Delete all but the `keep` newest backups, returning what was removed.
    pub fn prune(&self, keep: usize) -> BackupResult<Vec<BackupMeta>> {
        let stale: Vec<BackupMeta> = self.list()?.into_iter().skip(keep).collect();
        for backup in &stale {
            fs::remove_file(&backup.path).map_err(|source| BackupError::Remove {
                path: backup.path.clone(),
                source,
            })?;
        }
        if !stale.is_empty() {
            info!(removed = stale.len(), keep, "backups pruned");
        }
        Ok(stale)
    }

    /// What restoring the backup at `path` would change in the live file.
    pub fn diff(&self, path: &Path, store: &dyn HostsStore) -> BackupResult<BackupDiff> {
        let backup = self.read_backup(path)?;
        let live = match store.read_raw() {
            Ok(bytes) => bytes,
            Err(err) if !store.exists() => {
                warn!(error = %err, "live file missing, diffing against empty content");
                Vec::new()
            }
            Err(err) => return Err(err.into()),
        };
        Ok(diff_contents(&live, &backup))
    }

    fn read_backup(&self, path: &Path) -> BackupResult<Vec<u8>> {
        if !path.is_file() {
            return Err(BackupError::NotFound(path.to_path_buf()));
        }
        fs::read(path).map_err(|source| BackupError::Read {
            path: path.to_path_buf(),
            source,
        })
    }
}

impl std::fmt::Debug for BackupManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BackupManager")
            .field("dir", &self.dir)
            .finish_non_exhaustive()
    }
}
