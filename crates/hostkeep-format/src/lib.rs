//! Hosts file codec for hostkeep.
//!
//! Turns the raw text of an IP-to-hostname mapping file into addressable
//! [`Record`]s and back. Three line forms are understood:
//!
//! ```text
//! <ip> <domain> [<domain> ...] [#comment]
//! # standalone comment
//! (blank)
//! ```
//!
//! # Normalization
//!
//! Parsing is maximally permissive and never fails. Regeneration is lossy in
//! one documented way: blank lines are not reproduced, so the physical line
//! numbers of a regenerated file are compacted. [`Layout::id_map`] reports,
//! for every record handed to the generator, the identity it will carry when
//! the generated text is parsed again.
//!
//! # Modules
//!
//! - [`parse`] -- raw text to records
//! - [`layout`] -- records to physical lines, rendering, and id remapping

pub mod layout;
pub mod parse;

pub use layout::{generate, generate_with, layout, IdMap, Layout, LayoutLine, LineEnding};
pub use parse::parse;

use hostkeep_types::{Record, COMMENT_MARKER};

/// Normalize caller-supplied comment text so it always starts with the
/// comment marker. Empty or whitespace-only input yields an empty comment.
///
/// ```
/// use hostkeep_format::normalize_comment;
///
/// assert_eq!(normalize_comment("dev box"), "# dev box");
/// assert_eq!(normalize_comment("  #kept "), "#kept");
/// assert_eq!(normalize_comment("   "), "");
/// ```
pub fn normalize_comment(text: &str) -> String {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        String::new()
    } else if trimmed.starts_with(COMMENT_MARKER) {
        trimmed.to_string()
    } else {
        format!("{COMMENT_MARKER} {trimmed}")
    }
}

/// Highest line number in use, or 0 for an empty set.
pub fn max_line_number(records: &[Record]) -> u32 {
    records.iter().map(|r| r.line_number).max().unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn max_line_number_of_empty_is_zero() {
        assert_eq!(max_line_number(&[]), 0);
    }

    #[test]
    fn max_line_number_picks_highest() {
        let records = parse("127.0.0.1 localhost\n\n# c\n10.0.0.1 a b");
        assert_eq!(max_line_number(&records), 4);
    }
}
