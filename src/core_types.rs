use serde::{Deserialize, Serialize};

/// Opaque participant token (an email address in practice).
pub type Identifier = String;

/// Two members, or three for the single odd-one-out group of a run.
pub type Group = Vec<Identifier>;

/// Every participant in exactly one group. Group order is display-only.
pub type Partition = Vec<Group>;

/// A previously sent partition and how strongly it should discourage repeats.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub weight: u64,
    pub partition: Partition,
}

impl HistoryEntry {
    pub fn new(weight: u64, partition: Partition) -> Self {
        Self { weight, partition }
    }
}

/// One scored candidate produced during the search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sample {
    pub score: u64,
    pub partition: Partition,
}

/// Convenience for tests and callers holding string literals.
pub fn partition_from(groups: &[&[&str]]) -> Partition {
    groups
        .iter()
        .map(|g| g.iter().map(|s| s.to_string()).collect())
        .collect()
}
