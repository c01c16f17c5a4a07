use std::io;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::RwLock;

use crate::error::{StoreError, StoreResult};
use crate::traits::HostsStore;

const MEMORY_PATH: &str = "<memory>";

/// In-memory hosts file.
///
/// Intended for tests and embedding. Holds the file bytes behind a `RwLock`;
/// `None` models a missing file. Writes can be switched off to exercise
/// failure paths.
pub struct InMemoryHostsStore {
    content: RwLock<Option<Vec<u8>>>,
    read_only: AtomicBool,
    writes: AtomicUsize,
}

impl InMemoryHostsStore {
    /// Create a store holding `content`.
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: RwLock::new(Some(content.into().into_bytes())),
            read_only: AtomicBool::new(false),
            writes: AtomicUsize::new(0),
        }
    }

    /// Create a store whose file does not exist yet.
    pub fn missing() -> Self {
        Self {
            content: RwLock::new(None),
            read_only: AtomicBool::new(false),
            writes: AtomicUsize::new(0),
        }
    }

    /// Make every subsequent write fail with [`StoreError::ReadOnly`].
    pub fn set_read_only(&self, read_only: bool) {
        self.read_only.store(read_only, Ordering::SeqCst);
    }

    /// Replace the content behind the store's back, like an external editor.
    pub fn replace(&self, content: impl Into<String>) {
        *self.content.write().expect("lock poisoned") = Some(content.into().into_bytes());
    }

    /// Current content as text, or `None` if missing.
    pub fn content(&self) -> Option<String> {
        self.content
            .read()
            .expect("lock poisoned")
            .as_ref()
            .map(|bytes| String::from_utf8_lossy(bytes).into_owned())
    }

    /// Number of successful writes so far.
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

impl Default for InMemoryHostsStore {
    fn default() -> Self {
        Self::new("")
    }
}

impl HostsStore for InMemoryHostsStore {
    fn read_raw(&self) -> StoreResult<Vec<u8>> {
        self.content
            .read()
            .expect("lock poisoned")
            .clone()
            .ok_or_else(|| StoreError::Read {
                path: PathBuf::from(MEMORY_PATH),
                source: io::Error::new(io::ErrorKind::NotFound, "no content"),
            })
    }

    fn write_raw(&self, bytes: &[u8]) -> StoreResult<()> {
        if self.read_only.load(Ordering::SeqCst) {
            return Err(StoreError::ReadOnly);
        }
        *self.content.write().expect("lock poisoned") = Some(bytes.to_vec());
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn exists(&self) -> bool {
        self.content.read().expect("lock poisoned").is_some()
    }
}

impl std::fmt::Debug for InMemoryHostsStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let len = self
            .content
            .read()
            .expect("lock poisoned")
            .as_ref()
            .map(Vec::len);
        f.debug_struct("InMemoryHostsStore")
            .field("len", &len)
            .field("writes", &self.write_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hostkeep_types::Record;

    // -----------------------------------------------------------------------
    // Read / write cycle
    // -----------------------------------------------------------------------

    #[test]
    fn read_all_parses_content() {
        let store = InMemoryHostsStore::new("127.0.0.1 localhost\n");
        let records = store.read_all().unwrap();
        assert_eq!(records, vec![Record::domain(1, "127.0.0.1", "localhost", "")]);
    }

    #[test]
    fn write_all_replaces_content() {
        let store = InMemoryHostsStore::default();
        store
            .write_all(&[Record::domain(1, "10.0.0.1", "a.com", "")])
            .unwrap();
        assert_eq!(store.content().as_deref(), Some("10.0.0.1 a.com\n"));
        assert_eq!(store.write_count(), 1);
    }

    #[test]
    fn raw_round_trip_is_verbatim() {
        let store = InMemoryHostsStore::default();
        store.write_raw(b"\n\n# odd spacing   \n").unwrap();
        assert_eq!(store.read_raw().unwrap(), b"\n\n# odd spacing   \n");
    }

    // -----------------------------------------------------------------------
    // Fault injection
    // -----------------------------------------------------------------------

    #[test]
    fn missing_content_is_a_read_error() {
        let store = InMemoryHostsStore::missing();
        assert!(!store.exists());
        assert!(matches!(store.read_all(), Err(StoreError::Read { .. })));
    }

    #[test]
    fn read_only_rejects_writes() {
        let store = InMemoryHostsStore::new("127.0.0.1 localhost\n");
        store.set_read_only(true);

        let err = store.write_all(&[]).unwrap_err();
        assert!(matches!(err, StoreError::ReadOnly));
        assert_eq!(store.content().as_deref(), Some("127.0.0.1 localhost\n"));
        assert_eq!(store.write_count(), 0);

        store.set_read_only(false);
        store.write_all(&[]).unwrap();
        assert_eq!(store.content().as_deref(), Some(""));
    }

    #[test]
    fn external_replace_is_visible() {
        let store = InMemoryHostsStore::new("127.0.0.1 localhost\n");
        store.replace("10.0.0.1 other\n");
        assert_eq!(store.read_all().unwrap()[0].domain, "other");
    }

    #[test]
    fn debug_format() {
        let store = InMemoryHostsStore::new("x y\n");
        let debug = format!("{store:?}");
        assert!(debug.contains("InMemoryHostsStore"));
        assert!(debug.contains("writes"));
    }
}
