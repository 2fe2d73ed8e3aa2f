use crate::consts::MATCH_THRESHOLD;
use crate::core_types::{Group, Identifier};

/// Number of members two groups have in common.
#[inline]
pub fn shared_members(a: &[Identifier], b: &[Identifier]) -> usize {
    a.iter().filter(|id| b.contains(id)).count()
}

/// Two groups are a repeat when they share at least two members.
///
/// Not set equality: a pair inside an old triple, or an
/// old pair re-embedded in a new triple, still counts as meeting again.
#[inline]
pub fn groups_match(a: &[Identifier], b: &[Identifier]) -> bool {
    shared_members(a, b) >= MATCH_THRESHOLD
}

/// True if `group` repeats any group of `partition`. Stops at the first hit.
pub fn has_group_in_partition(group: &[Identifier], partition: &[Group]) -> bool {
    partition.iter().any(|other| groups_match(group, other))
}
