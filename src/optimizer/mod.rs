pub mod generator;
pub mod runner;

pub use self::generator::{generate_partition, shuffle_identifiers};
pub use self::runner::{
    NoProgress, OptimizationResult, Optimizer, PairingOptions, ProgressCallback,
};
use crate::core_types::{HistoryEntry, Identifier, Partition};

/// Best of `sample_count` random partitions against `history`.
///
/// Monte Carlo search: not guaranteed optimal, but cheap for groups of a few
/// dozen people. Fewer than two identifiers return `(0, [])` without searching.
pub fn optimize(
    identifiers: &[Identifier],
    history: &[HistoryEntry],
    sample_count: usize,
) -> (u64, Partition) {
    optimize_seeded(identifiers, history, sample_count, None)
}

/// `optimize` with a fixed seed for reproducible runs.
pub fn optimize_seeded(
    identifiers: &[Identifier],
    history: &[HistoryEntry],
    sample_count: usize,
    seed: Option<u64>,
) -> (u64, Partition) {
    let options = PairingOptions {
        sample_count,
        seed,
        ..Default::default()
    };
    let result = Optimizer::new(options).run(identifiers, history);
    (result.score, result.partition)
}
