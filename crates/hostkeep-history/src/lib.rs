//! Reversible commands and linear undo/redo history for hostkeep.
//!
//! A [`Command`] is plain data describing one change to the hosts file.
//! [`execute`] and [`rollback`] run it against an explicitly passed
//! [`HostsStore`](hostkeep_store::HostsStore), always re-reading the file
//! first. [`CommandHistory`] keeps the applied and undone stacks.
//!
//! # Identity across rewrites
//!
//! Record ids are positional, so a write that compacts blank lines or drops
//! a line renumbers the records after it. Every successful write returns an
//! [`IdMap`](hostkeep_format::IdMap); the history carries the ids held by
//! its stored commands through that map so later undo and redo still find
//! their records.

mod edits;

pub mod command;
pub mod error;
pub mod execute;
pub mod history;

pub use command::{Command, CommandKind};
pub use error::{Direction, HistoryError, HistoryResult};
pub use execute::{execute, rollback};
pub use history::CommandHistory;
