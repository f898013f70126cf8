use sinkhole_dns_domain::{BlacklistedRecord, ListKind};
use std::fmt;

/// What made a candidate blocked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockSource {
    /// A `Black` entry in one of the verdict caches.
    List(ListKind),
    /// The remote verdict authority returned a record.
    Authority(BlacklistedRecord),
}

impl fmt::Display for BlockSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::List(kind) => write!(f, "list:{}", kind),
            Self::Authority(record) => write!(f, "authority:{}", record.source),
        }
    }
}

/// Result of running the sinkhole policy over one resolved message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SinkholeDecision {
    Allowed,
    /// Allowed, but a candidate matched a `Log` entry.
    Logged { candidate: String, list: ListKind },
    /// The answer section was rewritten to the sinkhole address.
    Blocked { candidate: String, source: BlockSource },
}

impl SinkholeDecision {
    pub fn is_blocked(&self) -> bool {
        matches!(self, Self::Blocked { .. })
    }
}
