#![allow(dead_code)]

use synapse::core_types::{partition_from, HistoryEntry, Identifier};

/// `ex1@a.bc` .. `exN@a.bc`
pub fn emails(n: usize) -> Vec<Identifier> {
    (1..=n).map(|i| format!("ex{}@a.bc", i)).collect()
}

pub fn group(raw: &[&str]) -> Vec<Identifier> {
    raw.iter().map(|s| s.to_string()).collect()
}

/// Two sent rounds: weight 100 (four pairs and a triple) and weight 50.
pub fn two_round_history() -> Vec<HistoryEntry> {
    vec![
        HistoryEntry::new(
            100,
            partition_from(&[
                &["ex1@a.bc", "ex2@a.bc"],
                &["ex3@a.bc", "ex4@a.bc"],
                &["ex5@a.bc", "ex6@a.bc"],
                &["ex7@a.bc", "ex8@a.bc"],
                &["ex9@a.bc", "ex10@a.bc", "ex11@a.bc"],
            ]),
        ),
        HistoryEntry::new(
            50,
            partition_from(&[
                &["ex5@a.bc", "ex1@a.bc"],
                &["ex6@a.bc", "ex2@a.bc"],
                &["ex7@a.bc", "ex3@a.bc"],
                &["ex8@a.bc", "ex4@a.bc"],
                &["ex9@a.bc", "ex5@a.bc"],
            ]),
        ),
    ]
}

/// Group sizes, sorted, so assertions do not depend on group order.
pub fn sorted_sizes(partition: &[Vec<Identifier>]) -> Vec<usize> {
    let mut sizes: Vec<usize> = partition.iter().map(|g| g.len()).collect();
    sizes.sort();
    sizes
}

/// Every member of the partition, sorted.
pub fn members(partition: &[Vec<Identifier>]) -> Vec<Identifier> {
    let mut all: Vec<Identifier> = partition.iter().flatten().cloned().collect();
    all.sort();
    all
}
