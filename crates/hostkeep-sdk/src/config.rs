use std::fs;
use std::path::{Path, PathBuf};

use hostkeep_format::LineEnding;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{HostsError, SdkResult};

const APP_DIR: &str = "hostkeep";

/// Settings for a [`HostsService`](crate::HostsService).
///
/// Every field has a default, so a config file only needs the keys it
/// overrides.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// The hosts file being managed.
    pub hosts_path: PathBuf,
    /// Where backups are written.
    pub backup_dir: PathBuf,
    pub line_ending: LineEnding,
    /// Cap on the undo stack; oldest entries are dropped.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub history_limit: Option<usize>,
    /// Backups kept after each new backup; older ones are pruned.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_backups: Option<usize>,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            hosts_path: default_hosts_path(),
            backup_dir: default_backup_dir(),
            line_ending: LineEnding::default(),
            history_limit: None,
            max_backups: None,
        }
    }
}

impl ServiceConfig {
    /// Load from a TOML file. A missing file yields the defaults.
    pub fn load(path: &Path) -> SdkResult<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }
        let text = fs::read_to_string(path).map_err(|e| HostsError::Config {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        toml::from_str(&text).map_err(|e| HostsError::Config {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }

    /// `<config dir>/hostkeep/config.toml`, if the platform has a config dir.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join(APP_DIR).join("config.toml"))
    }
}

/// The platform's system hosts file.
pub fn default_hosts_path() -> PathBuf {
    if cfg!(windows) {
        PathBuf::from(r"C:\Windows\System32\drivers\etc\hosts")
    } else {
        PathBuf::from("/etc/hosts")
    }
}

/// `<data dir>/hostkeep/backups`, falling back to the working directory.
pub fn default_backup_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR)
        .join("backups")
}
