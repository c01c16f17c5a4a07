//! Basic syntactic checks on caller-supplied fields.
//!
//! A valid ip or domain token:
//! - Must be non-empty
//! - Must not contain whitespace (it would split into several tokens)
//! - Must not start with the comment marker (it would re-parse as a comment)
//!
//! Comments may hold any text on a single line. A comment-only record must
//! keep some text, since a blank one leaves nothing to write back.
//!
//! Whether the ip is a real address or the domain a real hostname is left
//! to the caller.

use crate::error::TypeError;
use crate::fields::{HostFields, RecordPatch};
use crate::record::COMMENT_MARKER;

fn validate_token(field: &'static str, value: &str) -> Result<(), TypeError> {
    let invalid = |reason: &str| TypeError::InvalidField {
        field,
        value: value.to_string(),
        reason: reason.into(),
    };

    if value.is_empty() {
        return Err(invalid("must not be empty"));
    }
    if value.chars().any(char::is_whitespace) {
        return Err(invalid("must not contain whitespace"));
    }
    if value.starts_with(COMMENT_MARKER) {
        return Err(invalid("must not start with '#'"));
    }
    Ok(())
}

/// Validate an ip token.
///
/// ```
/// use hostkeep_types::validate_ip;
///
/// assert!(validate_ip("127.0.0.1").is_ok());
/// assert!(validate_ip("::1").is_ok());
/// assert!(validate_ip("").is_err());
/// assert!(validate_ip("#1.2.3.4").is_err());
/// ```
pub fn validate_ip(ip: &str) -> Result<(), TypeError> {
    validate_token("ip", ip)
}

/// Validate a domain token.
pub fn validate_domain(domain: &str) -> Result<(), TypeError> {
    validate_token("domain", domain)
}

/// Validate comment text. Line terminators would split it into extra
/// physical lines.
pub fn validate_comment(comment: &str) -> Result<(), TypeError> {
    if comment.contains(['\n', '\r']) {
        return Err(TypeError::InvalidField {
            field: "comment",
            value: comment.to_string(),
            reason: "must not contain line breaks".into(),
        });
    }
    Ok(())
}

/// Validate the fields of a new domain record.
pub fn validate_fields(fields: &HostFields) -> Result<(), TypeError> {
    validate_ip(&fields.ip)?;
    validate_domain(&fields.domain)?;
    if let Some(comment) = &fields.comment {
        validate_comment(comment)?;
    }
    Ok(())
}

/// Validate a patch against the kind of record it will be merged over.
pub fn validate_patch(patch: &RecordPatch, target_is_comment: bool) -> Result<(), TypeError> {
    if target_is_comment && patch.touches_address() {
        return Err(TypeError::AddressOnCommentLine);
    }
    if let Some(ip) = &patch.ip {
        validate_ip(ip)?;
    }
    if let Some(domain) = &patch.domain {
        validate_domain(domain)?;
    }
    if let Some(comment) = &patch.comment {
        validate_comment(comment)?;
        if target_is_comment && comment.trim().is_empty() {
            return Err(TypeError::BlankCommentLine);
        }
    }
    Ok(())
}
