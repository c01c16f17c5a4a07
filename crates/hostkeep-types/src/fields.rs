use serde::{Deserialize, Serialize};

/// Field set for a new domain record.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostFields {
    pub ip: String,
    pub domain: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

impl HostFields {
    pub fn new(ip: impl Into<String>, domain: impl Into<String>) -> Self {
        Self {
            ip: ip.into(),
            domain: domain.into(),
            comment: None,
        }
    }

    /// Attach a trailing comment.
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }
}

/// Partial field set merged over an existing record.
///
/// Unset fields keep the existing value.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ip: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

impl RecordPatch {
    pub fn ip(mut self, ip: impl Into<String>) -> Self {
        self.ip = Some(ip.into());
        self
    }

    pub fn domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = Some(domain.into());
        self
    }

    pub fn comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    /// Returns `true` if the patch changes nothing.
    pub fn is_empty(&self) -> bool {
        self.ip.is_none() && self.domain.is_none() && self.comment.is_none()
    }

    /// Returns `true` if the patch touches `ip` or `domain`.
    pub fn touches_address(&self) -> bool {
        self.ip.is_some() || self.domain.is_some()
    }
}
