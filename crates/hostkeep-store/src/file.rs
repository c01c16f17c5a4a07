use std::fs;
use std::path::{Path, PathBuf};

use hostkeep_format::LineEnding;
use tracing::debug;

use crate::error::{StoreError, StoreResult};
use crate::traits::HostsStore;

/// Hosts file on disk.
#[derive(Clone, Debug)]
pub struct FileHostsStore {
    path: PathBuf,
    line_ending: LineEnding,
}

impl FileHostsStore {
    /// Store over `path`, regenerating with `\n` terminators.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            line_ending: LineEnding::Lf,
        }
    }

    pub fn with_line_ending(mut self, line_ending: LineEnding) -> Self {
        self.line_ending = line_ending;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl HostsStore for FileHostsStore {
    fn read_raw(&self) -> StoreResult<Vec<u8>> {
        let bytes = fs::read(&self.path).map_err(|source| StoreError::Read {
            path: self.path.clone(),
            source,
        })?;
        debug!(path = %self.path.display(), len = bytes.len(), "hosts read");
        Ok(bytes)
    }

    fn write_raw(&self, bytes: &[u8]) -> StoreResult<()> {
        fs::write(&self.path, bytes).map_err(|source| StoreError::Write {
            path: self.path.clone(),
            source,
        })?;
        debug!(path = %self.path.display(), len = bytes.len(), "hosts written");
        Ok(())
    }

    fn exists(&self) -> bool {
        self.path.is_file()
    }

    fn line_ending(&self) -> LineEnding {
        self.line_ending
    }
}
