pub mod matching;
pub mod types;

pub use self::matching::{groups_match, has_group_in_partition, shared_members};
pub use self::types::{GroupScore, ScoreDetails};
use crate::core_types::{Group, HistoryEntry};

/// Repetition score of a candidate partition. Lower is better.
///
/// Every (group, history entry) pair where the group repeats some group of
/// that entry adds the entry's weight once. A triple can therefore collect
/// weight from several entries through different member subsets.
pub fn score(partition: &[Group], history: &[HistoryEntry]) -> u64 {
    if history.is_empty() {
        return 0;
    }

    partition
        .iter()
        .map(|group| {
            history
                .iter()
                .filter(|entry| has_group_in_partition(group, &entry.partition))
                .map(|entry| entry.weight)
                .sum::<u64>()
        })
        .sum()
}

/// Per-group breakdown of `score`, used for reports and audits.
pub fn score_details(partition: &[Group], history: &[HistoryEntry]) -> ScoreDetails {
    let mut details = ScoreDetails::default();

    for group in partition {
        let mut penalty = 0;
        let mut matched_entries = Vec::new();

        for (idx, entry) in history.iter().enumerate() {
            if has_group_in_partition(group, &entry.partition) {
                penalty += entry.weight;
                matched_entries.push(idx);
            }
        }

        details.total += penalty;
        details.groups.push(GroupScore {
            group: group.clone(),
            penalty,
            matched_entries,
        });
    }

    details
}
