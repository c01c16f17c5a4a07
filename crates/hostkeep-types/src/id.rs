use std::sync::atomic::{AtomicU64, Ordering};

use crate::record::RecordId;

/// Source of fresh identities for records created in-process.
pub trait IdMinter: Send + Sync {
    fn mint(&self) -> RecordId;
}

/// Monotonically increasing in-process counter, starting at 1.
#[derive(Debug, Default)]
pub struct SequentialIdMinter {
    next: AtomicU64,
}

impl SequentialIdMinter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start counting after `last`.
    pub fn starting_after(last: u64) -> Self {
        Self {
            next: AtomicU64::new(last),
        }
    }
}

impl IdMinter for SequentialIdMinter {
    fn mint(&self) -> RecordId {
        let seq = self.next.fetch_add(1, Ordering::Relaxed) + 1;
        RecordId::minted(seq)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mints_in_sequence() {
        let minter = SequentialIdMinter::new();
        assert_eq!(minter.mint().as_str(), "new-1");
        assert_eq!(minter.mint().as_str(), "new-2");
        assert_eq!(minter.mint().as_str(), "new-3");
    }

    #[test]
    fn starting_after_skips_ahead() {
        let minter = SequentialIdMinter::starting_after(41);
        assert_eq!(minter.mint().as_str(), "new-42");
    }
}
