use thiserror::Error;

/// Errors produced by field validation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("invalid {field} {value:?}: {reason}")]
    InvalidField {
        field: &'static str,
        value: String,
        reason: String,
    },

    #[error("comment-only records cannot take an ip or domain")]
    AddressOnCommentLine,

    #[error("comment-only records cannot be blanked; delete the record instead")]
    BlankCommentLine,
}
