//! Foundation types for hostkeep.
//!
//! This crate provides the data model shared by every other hostkeep crate:
//! the addressable [`Record`] parsed out of a hosts file, the identity token
//! that addresses it, the payloads callers use to create or edit records,
//! and the metadata describing a backup snapshot.
//!
//! # Key Types
//!
//! - [`Record`] -- One addressable unit of a hosts file (a domain or a comment line)
//! - [`RecordId`] -- Identity token derived from line number and domain, or freshly minted
//! - [`HostFields`] -- Field set for a new domain record
//! - [`RecordPatch`] -- Partial field set merged over an existing record
//! - [`BackupMeta`] -- Metadata for one backup file
//! - [`IdMinter`] / [`Clock`] -- Injected sources of fresh identities and time

pub mod backup;
pub mod clock;
pub mod error;
pub mod fields;
pub mod id;
pub mod record;
pub mod validate;

pub use backup::BackupMeta;
pub use clock::{Clock, FixedClock, SystemClock};
pub use error::TypeError;
pub use fields::{HostFields, RecordPatch};
pub use id::{IdMinter, SequentialIdMinter};
pub use record::{Record, RecordId, COMMENT_MARKER};
pub use validate::{validate_comment, validate_domain, validate_fields, validate_ip, validate_patch};
