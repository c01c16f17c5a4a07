use std::path::{Path, PathBuf};
use std::sync::Arc;

use hostkeep_backup::{BackupDiff, BackupManager};
use hostkeep_format::normalize_comment;
use hostkeep_history::{Command, CommandHistory, CommandKind};
use hostkeep_store::{FileHostsStore, HostsStore};
use hostkeep_types::{
    validate_fields, validate_patch, BackupMeta, HostFields, IdMinter, Record, RecordId,
    RecordPatch, SequentialIdMinter,
};
use tracing::{info, warn};

use crate::config::ServiceConfig;
use crate::error::{HostsError, SdkResult};

/// The hosts manager.
///
/// Owns the undo/redo history for one hosts file. Every mutating call
/// re-reads the file, applies one change and writes the file back once; the
/// change is recorded for undo only after that write succeeded.
pub struct HostsService {
    store: Arc<dyn HostsStore>,
    backups: BackupManager,
    history: CommandHistory,
    minter: Arc<dyn IdMinter>,
    max_backups: Option<usize>,
    hosts_path: PathBuf,
}

impl HostsService {
    /// Service over `store`, keeping backups with `backups`.
    pub fn new(store: Arc<dyn HostsStore>, backups: BackupManager) -> Self {
        Self {
            store,
            backups,
            history: CommandHistory::new(),
            minter: Arc::new(SequentialIdMinter::new()),
            max_backups: None,
            hosts_path: PathBuf::from("<hosts>"),
        }
    }

    /// Service over the file and backup directory named in `config`.
    pub fn from_config(config: &ServiceConfig) -> Self {
        let store = FileHostsStore::new(&config.hosts_path).with_line_ending(config.line_ending);
        Self::new(Arc::new(store), BackupManager::new(&config.backup_dir))
            .with_history_limit(config.history_limit)
            .with_max_backups(config.max_backups)
            .with_hosts_path(&config.hosts_path)
    }

    pub fn with_minter(mut self, minter: Arc<dyn IdMinter>) -> Self {
        self.minter = minter;
        self
    }

    pub fn with_history_limit(mut self, limit: Option<usize>) -> Self {
        self.history = CommandHistory::with_limit(limit);
        self
    }

    pub fn with_max_backups(mut self, max: Option<usize>) -> Self {
        self.max_backups = max;
        self
    }

    /// Path reported in initialization errors.
    pub fn with_hosts_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.hosts_path = path.into();
        self
    }

    // ---- Lifecycle ----

    /// Check that the hosts file exists and parses, and that the backup
    /// directory is in place.
    pub fn initialize(&self) -> SdkResult<()> {
        let init_err = |reason: String| HostsError::Init {
            path: self.hosts_path.clone(),
            reason,
        };

        if !self.store.exists() {
            return Err(init_err("hosts file does not exist".into()));
        }
        let records = self
            .store
            .read_all()
            .map_err(|e| init_err(e.to_string()))?;
        self.backups
            .ensure_dir()
            .map_err(|e| init_err(e.to_string()))?;

        info!(
            records = records.len(),
            backups = %self.backups.dir().display(),
            "hosts service initialized"
        );
        Ok(())
    }

    // ---- Reads ----

    /// Every record in the current file.
    pub fn get_hosts(&self) -> SdkResult<Vec<Record>> {
        Ok(self.store.read_all()?)
    }

    /// The current file text.
    pub fn raw_content(&self) -> SdkResult<String> {
        Ok(self.store.read_text()?)
    }

    // ---- Mutations ----

    /// Append a domain record on a new trailing line. Returns the id it can
    /// be addressed by on the next read.
    pub fn add_host(&mut self, fields: HostFields) -> SdkResult<RecordId> {
        validate_fields(&fields)?;
        let comment = normalize_comment(fields.comment.as_deref().unwrap_or_default());

        let mut record = Record::domain(0, fields.ip, fields.domain, comment);
        record.id = self.minter.mint();
        let minted = record.id.clone();

        let map = self.history.submit(Command::add(record), self.store.as_ref())?;
        Ok(map.resolve(&minted))
    }

    /// Merge `patch` over the record currently addressed by `old.id`.
    /// Returns the record's id after the change.
    pub fn update_host(&mut self, old: &Record, mut patch: RecordPatch) -> SdkResult<RecordId> {
        validate_patch(&patch, old.is_comment)?;
        if let Some(comment) = patch.comment.as_mut() {
            *comment = normalize_comment(comment);
        }

        let map = self
            .history
            .submit(Command::update(old.id.clone(), patch), self.store.as_ref())?;
        Ok(map.resolve(&old.id))
    }

    /// Remove one record.
    pub fn delete_host(&mut self, record: &Record) -> SdkResult<()> {
        self.history
            .submit(Command::delete(record.clone()), self.store.as_ref())?;
        Ok(())
    }

    /// Remove several records with one write and one undo step.
    pub fn delete_hosts(&mut self, records: &[Record]) -> SdkResult<()> {
        if records.is_empty() {
            return Ok(());
        }
        let targets = records.iter().map(|r| r.id.clone()).collect();
        self.history
            .submit(Command::delete_batch(targets), self.store.as_ref())?;
        Ok(())
    }

    // ---- History ----

    pub fn undo(&mut self) -> SdkResult<CommandKind> {
        Ok(self.history.undo(self.store.as_ref())?)
    }

    pub fn redo(&mut self) -> SdkResult<CommandKind> {
        Ok(self.history.redo(self.store.as_ref())?)
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn undo_depth(&self) -> usize {
        self.history.undo_depth()
    }

    pub fn redo_depth(&self) -> usize {
        self.history.redo_depth()
    }

    // ---- Backups ----

    /// Snapshot the live file. Prunes old backups when a cap is configured.
    pub fn create_backup(&self) -> SdkResult<PathBuf> {
        let path = self.backups.create(self.store.as_ref())?;
        if let Some(keep) = self.max_backups {
            if let Err(err) = self.backups.prune(keep) {
                warn!(error = %err, keep, "backup created but pruning failed");
            }
        }
        Ok(path)
    }

    /// Overwrite the live file with a backup and discard all history.
    pub fn restore_backup(&mut self, path: &Path) -> SdkResult<()> {
        self.backups.restore(path, self.store.as_ref())?;
        self.history.clear();
        Ok(())
    }

    /// Backups, newest first.
    pub fn get_backups(&self) -> SdkResult<Vec<BackupMeta>> {
        Ok(self.backups.list()?)
    }

    /// Delete all but the `keep` newest backups.
    pub fn prune_backups(&self, keep: usize) -> SdkResult<Vec<BackupMeta>> {
        Ok(self.backups.prune(keep)?)
    }

    /// What restoring `path` would change.
    pub fn diff_backup(&self, path: &Path) -> SdkResult<BackupDiff> {
        Ok(self.backups.diff(path, self.store.as_ref())?)
    }
}

impl std::fmt::Debug for HostsService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HostsService")
            .field("hosts_path", &self.hosts_path)
            .field("backups", &self.backups)
            .field("history", &self.history)
            .finish_non_exhaustive()
    }
}
