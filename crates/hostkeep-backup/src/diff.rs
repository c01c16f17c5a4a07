//! Line diff between a backup and the live file.
//!
//! Uses `similar` (Myers) to group changes into hunks with three lines of
//! context, so a restore can be inspected before it is committed.

use std::fmt;

use similar::{ChangeTag, TextDiff};

/// What restoring a backup would change, expressed from the live file
/// (old side) to the backup (new side).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BackupDiff {
    pub hunks: Vec<DiffHunk>,
}

impl BackupDiff {
    /// Returns `true` if the backup matches the live file.
    pub fn is_empty(&self) -> bool {
        self.hunks.is_empty()
    }

    /// Lines the restore would add.
    pub fn additions(&self) -> usize {
        self.count(|l| matches!(l, DiffLine::Added(_)))
    }

    /// Lines the restore would remove.
    pub fn deletions(&self) -> usize {
        self.count(|l| matches!(l, DiffLine::Removed(_)))
    }

    fn count(&self, pred: impl Fn(&DiffLine) -> bool) -> usize {
        self.hunks.iter().flat_map(|h| &h.lines).filter(|l| pred(l)).count()
    }
}

/// A contiguous region of changes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DiffHunk {
    /// 1-based start line in the live file.
    pub old_start: usize,
    /// 1-based start line in the backup.
    pub new_start: usize,
    pub lines: Vec<DiffLine>,
}

/// One line in a hunk, without its terminator.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DiffLine {
    Context(String),
    Added(String),
    Removed(String),
}

impl fmt::Display for BackupDiff {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for hunk in &self.hunks {
            writeln!(f, "@@ -{} +{} @@", hunk.old_start, hunk.new_start)?;
            for line in &hunk.lines {
                match line {
                    DiffLine::Context(text) => writeln!(f, " {text}")?,
                    DiffLine::Added(text) => writeln!(f, "+{text}")?,
                    DiffLine::Removed(text) => writeln!(f, "-{text}")?,
                }
            }
        }
        Ok(())
    }
}

/// Diff `live` against `backup`. Invalid UTF-8 is replaced.
pub fn diff_contents(live: &[u8], backup: &[u8]) -> BackupDiff {
    let old = String::from_utf8_lossy(live);
    let new = String::from_utf8_lossy(backup);
    if old == new {
        return BackupDiff { hunks: Vec::new() };
    }

    let text_diff = TextDiff::from_lines(old.as_ref(), new.as_ref());
    let mut hunks = Vec::new();

    for group in text_diff.grouped_ops(3) {
        let Some(first) = group.first() else {
            continue;
        };
        let mut hunk = DiffHunk {
            old_start: first.old_range().start + 1,
            new_start: first.new_range().start + 1,
            lines: Vec::new(),
        };
        for op in &group {
            for change in text_diff.iter_changes(op) {
                let text = change
                    .value()
                    .trim_end_matches(['\n', '\r'])
                    .to_string();
                hunk.lines.push(match change.tag() {
                    ChangeTag::Equal => DiffLine::Context(text),
                    ChangeTag::Insert => DiffLine::Added(text),
                    ChangeTag::Delete => DiffLine::Removed(text),
                });
            }
        }
        hunks.push(hunk);
    }

    BackupDiff { hunks }
}
