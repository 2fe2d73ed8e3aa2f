use crate::core_types::Group;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupScore {
    pub group: Group,
    /// Sum of the weights of every history entry this group repeats.
    pub penalty: u64,
    /// Indices into the history slice that matched.
    pub matched_entries: Vec<usize>,
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreDetails {
    pub total: u64,
    pub groups: Vec<GroupScore>,
}

impl ScoreDetails {
    /// Groups that repeat at least one history entry.
    pub fn repeats(&self) -> impl Iterator<Item = &GroupScore> {
        self.groups.iter().filter(|g| g.penalty > 0)
    }
}
