//! Backing-file access for hostkeep.
//!
//! The hosts file is the single source of truth. Nothing here caches
//! records: every [`HostsStore::read_all`] goes back to the file and every
//! [`HostsStore::write_all`] regenerates and overwrites it whole.
//!
//! # Storage Backends
//!
//! All backends implement the [`HostsStore`] trait:
//!
//! - [`FileHostsStore`] -- the real file on disk
//! - [`InMemoryHostsStore`] -- byte buffer for tests and embedding, with fault injection
//!
//! # Design Rules
//!
//! 1. One read or one write per call; a write is a single whole-file overwrite.
//! 2. No locks are taken on the backing file. Callers re-read right before
//!    they mutate, which narrows but does not close the window for lost
//!    updates against other writers.
//! 3. All I/O errors are propagated, never silently ignored.

pub mod error;
pub mod file;
pub mod memory;
pub mod traits;

pub use error::{StoreError, StoreResult};
pub use file::FileHostsStore;
pub use memory::InMemoryHostsStore;
pub use traits::HostsStore;
