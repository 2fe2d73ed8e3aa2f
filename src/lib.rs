//! History-aware pairing of group members for recurring one-on-ones.
//!
//! The core is `optimizer` + `scorer`: sample random partitions, score each
//! against weighted history, keep the least repetitive one. `roster`,
//! `history` and `notify` are the file-backed collaborators around it.

pub mod clock;
pub mod config;
pub mod consts;
pub mod core_types;
pub mod error;
pub mod history;
pub mod notify;
pub mod optimizer;
pub mod roster;
pub mod scorer;

pub use crate::core_types::{Group, HistoryEntry, Identifier, Partition, Sample};
pub use crate::error::{SynResult, SynapseError};
pub use crate::optimizer::{generate_partition, optimize};
pub use crate::scorer::score;
