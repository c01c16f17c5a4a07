//! Linear undo/redo history.

use hostkeep_format::IdMap;
use hostkeep_store::HostsStore;
use tracing::{debug, info, warn};

use crate::command::{Command, CommandKind};
use crate::error::{Direction, HistoryError, HistoryResult};
use crate::execute::{execute, rollback};

/// Two-stack command history.
///
/// `applied` holds commands whose effect is in the file (most recent last),
/// `undone` holds commands that were reversed and may be re-applied. A
/// command only lands on either stack after its write succeeded.
#[derive(Debug, Default)]
pub struct CommandHistory {
    applied: Vec<Command>,
    undone: Vec<Command>,
    limit: Option<usize>,
}

impl CommandHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// History whose applied stack keeps at most `limit` commands.
    pub fn with_limit(limit: Option<usize>) -> Self {
        Self {
            limit,
            ..Self::default()
        }
    }

    /// Execute `command` against `store` and record it on success.
    pub fn submit(&mut self, mut command: Command, store: &dyn HostsStore) -> HistoryResult<IdMap> {
        let map = execute(&mut command, store)?;
        self.push(command, &map);
        Ok(map)
    }

    /// Record an already executed command whose write produced `map`.
    ///
    /// Clears the redo lineage.
    pub fn push(&mut self, command: Command, map: &IdMap) {
        self.remap_all(map);
        debug!(command = %command, "history push");
        self.applied.push(command);

        if !self.undone.is_empty() {
            debug!(dropped = self.undone.len(), "redo lineage cleared");
            self.undone.clear();
        }

        if let Some(limit) = self.limit {
            while self.applied.len() > limit {
                self.applied.remove(0);
            }
        }
    }

    /// Reverse the most recent applied command.
    ///
    /// On failure the command goes back onto the applied stack.
    pub fn undo(&mut self, store: &dyn HostsStore) -> HistoryResult<CommandKind> {
        let mut command = self
            .applied
            .pop()
            .ok_or(HistoryError::NoHistory(Direction::Undo))?;

        match rollback(&mut command, store) {
            Ok(map) => {
                self.remap_all(&map);
                let kind = command.kind();
                info!(command = %command, undo = self.applied.len(), redo = self.undone.len() + 1, "undone");
                self.undone.push(command);
                Ok(kind)
            }
            Err(err) => {
                warn!(command = %command, error = %err, "undo failed, history kept");
                self.applied.push(command);
                Err(err)
            }
        }
    }

    /// Re-apply the most recently undone command.
    ///
    /// On failure the command goes back onto the undone stack.
    pub fn redo(&mut self, store: &dyn HostsStore) -> HistoryResult<CommandKind> {
        let mut command = self
            .undone
            .pop()
            .ok_or(HistoryError::NoHistory(Direction::Redo))?;

        match execute(&mut command, store) {
            Ok(map) => {
                self.remap_all(&map);
                let kind = command.kind();
                info!(command = %command, undo = self.applied.len() + 1, redo = self.undone.len(), "redone");
                self.applied.push(command);
                Ok(kind)
            }
            Err(err) => {
                warn!(command = %command, error = %err, "redo failed, history kept");
                self.undone.push(command);
                Err(err)
            }
        }
    }

    /// Drop both stacks.
    pub fn clear(&mut self) {
        debug!(undo = self.applied.len(), redo = self.undone.len(), "history cleared");
        self.applied.clear();
        self.undone.clear();
    }

    pub fn can_undo(&self) -> bool {
        !self.applied.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.undone.is_empty()
    }

    pub fn undo_depth(&self) -> usize {
        self.applied.len()
    }

    pub fn redo_depth(&self) -> usize {
        self.undone.len()
    }

    /// Carry every stored command across a rewrite of the file.
    fn remap_all(&mut self, map: &IdMap) {
        if map.is_identity() {
            return;
        }
        for command in &mut self.applied {
            command.remap(map, true);
        }
        for command in &mut self.undone {
            command.remap(map, false);
        }
    }
}
