use std::fmt;

use serde::{Deserialize, Serialize};

/// Marker that starts a comment, both standalone and trailing.
pub const COMMENT_MARKER: char = '#';

/// Identity token for a [`Record`].
///
/// Parsed records carry an id derived from their position: `line-<n>` for a
/// comment-only line and `line-<n>-<domain>` for a domain record. Records
/// created in-process carry a minted `new-<k>` id until their first write,
/// after which the next read derives the positional id again.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    /// Wrap an arbitrary identity string.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Positional id for a comment-only line.
    pub fn for_comment(line_number: u32) -> Self {
        Self(format!("line-{line_number}"))
    }

    /// Positional id for a domain record.
    pub fn for_domain(line_number: u32, domain: &str) -> Self {
        Self(format!("line-{line_number}-{domain}"))
    }

    /// Id handed out to a record that has not been written yet.
    pub fn minted(seq: u64) -> Self {
        Self(format!("new-{seq}"))
    }

    /// Returns `true` if this id was minted rather than derived from a line.
    pub fn is_minted(&self) -> bool {
        self.0.starts_with("new-")
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RecordId({})", self.0)
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RecordId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for RecordId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// One addressable unit of a hosts file.
///
/// A physical line listing several domains for one IP yields several
/// sibling records sharing `ip`, `comment` and `line_number`. A standalone
/// comment line yields a single record with `is_comment` set and empty
/// `ip`/`domain`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    pub id: RecordId,
    pub ip: String,
    pub domain: String,
    /// Comment text including its leading marker, or empty.
    pub comment: String,
    pub is_comment: bool,
    /// 1-based source line this record belongs to.
    pub line_number: u32,
}

impl Record {
    /// A comment-only record for the given line.
    pub fn comment_line(line_number: u32, text: impl Into<String>) -> Self {
        Self {
            id: RecordId::for_comment(line_number),
            ip: String::new(),
            domain: String::new(),
            comment: text.into(),
            is_comment: true,
            line_number,
        }
    }

    /// A domain record with its positional id.
    pub fn domain(
        line_number: u32,
        ip: impl Into<String>,
        domain: impl Into<String>,
        comment: impl Into<String>,
    ) -> Self {
        let domain = domain.into();
        Self {
            id: RecordId::for_domain(line_number, &domain),
            ip: ip.into(),
            domain,
            comment: comment.into(),
            is_comment: false,
            line_number,
        }
    }

    /// The id this record will carry the next time its line is parsed.
    pub fn positional_id(&self) -> RecordId {
        if self.is_comment {
            RecordId::for_comment(self.line_number)
        } else {
            RecordId::for_domain(self.line_number, &self.domain)
        }
    }

    /// Returns `true` if this record has a trailing or standalone comment.
    pub fn has_comment(&self) -> bool {
        !self.comment.is_empty()
    }
}
