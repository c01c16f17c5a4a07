//! Raw hosts text to records.

use hostkeep_types::{Record, COMMENT_MARKER};
use tracing::trace;

/// Parse raw hosts file content into an ordered sequence of records.
///
/// Lines are numbered from 1 and processed in order:
/// - a blank line contributes nothing;
/// - a line whose trimmed form starts with `#` becomes one comment-only
///   record carrying the full trimmed text;
/// - any other line is split on whitespace runs. The first token is the ip;
///   the following tokens are domains until a token starts with `#`, at which
///   point that token and the rest are joined with single spaces into the
///   line's shared trailing comment. Every domain becomes a sibling record.
///
/// A non-comment line with fewer than two tokens, or with no domain before
/// its comment, is dropped silently.
pub fn parse(content: &str) -> Vec<Record> {
    let mut records = Vec::new();

    for (index, line) in content.lines().enumerate() {
        let line_number = index as u32 + 1;
        let trimmed = line.trim();

        if trimmed.is_empty() {
            continue;
        }

        if trimmed.starts_with(COMMENT_MARKER) {
            records.push(Record::comment_line(line_number, trimmed));
            continue;
        }

        let mut tokens = trimmed.split_whitespace();
        let Some(ip) = tokens.next() else {
            continue;
        };
        let rest: Vec<&str> = tokens.collect();
        if rest.is_empty() {
            trace!(line_number, "dropping single-token line");
            continue;
        }

        let boundary = rest
            .iter()
            .position(|token| token.starts_with(COMMENT_MARKER))
            .unwrap_or(rest.len());
        let comment = rest[boundary..].join(" ");

        for domain in &rest[..boundary] {
            records.push(Record::domain(line_number, ip, *domain, comment.clone()));
        }
    }

    records
}
