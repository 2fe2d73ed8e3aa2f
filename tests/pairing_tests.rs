mod common;

use common::{emails, group, members, sorted_sizes, two_round_history};
use rstest::rstest;
use synapse::core_types::{partition_from, HistoryEntry};
use synapse::optimizer::{optimize, optimize_seeded};
use synapse::scorer::{groups_match, has_group_in_partition, score};

// --- OPTIMIZE ---

#[test]
fn test_nine_people_no_history() {
    let ids = emails(9);
    let (score_found, partition) = optimize(&ids, &[], 10_000);

    assert_eq!(score_found, 0);
    assert_eq!(partition.len(), 4);
    assert_eq!(partition[0].len(), 2);
    assert_eq!(partition[1].len(), 2);
    assert_eq!(partition[2].len(), 2);
    assert_eq!(partition[3].len(), 3);
    assert_eq!(members(&partition), members(&[ids]));
}

#[test]
fn test_not_enough_people() {
    assert_eq!(optimize(&[], &[], 1000), (0, vec![]));
    assert_eq!(optimize(&emails(1), &[], 1000), (0, vec![]));
}

#[test]
fn test_nine_people_with_history() {
    let ids = emails(9);
    let history = vec![HistoryEntry::new(
        100,
        partition_from(&[&["ex1@a.bc", "ex2@a.bc"], &["ex3@a.bc", "ex4@a.bc"]]),
    )];

    let (found, partition) = optimize_seeded(&ids, &history, 10_000, Some(2022));

    assert_eq!(partition.len(), 4);
    assert_eq!(sorted_sizes(&partition), vec![2, 2, 2, 3]);
    assert_eq!(score(&partition, &history), found);
    // Avoiding two specific pairs among 9 people is easy within the budget.
    assert_eq!(found, 0);
}

#[test]
fn test_optimizer_avoids_recent_pair_when_possible() {
    // Four people, one recent pairing: the two partitions that split
    // ex1/ex2 both score 0 and are reachable.
    let ids = emails(4);
    let history = vec![HistoryEntry::new(
        300,
        partition_from(&[&["ex1@a.bc", "ex2@a.bc"], &["ex3@a.bc", "ex4@a.bc"]]),
    )];

    let (found, partition) = optimize_seeded(&ids, &history, 200, Some(5));
    assert_eq!(found, 0);
    for g in &partition {
        assert!(!has_group_in_partition(g, &history[0].partition));
    }
}

#[test]
fn test_unavoidable_repeat_is_scored() {
    // With two people there is only one possible pairing.
    let ids = emails(2);
    let history = vec![HistoryEntry::new(42, partition_from(&[&["ex2@a.bc", "ex1@a.bc"]]))];
    let (found, partition) = optimize(&ids, &history, 10);
    assert_eq!(found, 42);
    assert_eq!(partition.len(), 1);
}

// --- SCORE ---

#[rstest]
#[case(&[&["ex1@a.bc", "ex3@a.bc"] as &[&str], &["ex2@a.bc", "ex4@a.bc"], &["ex11@a.bc", "ex9@a.bc"]], 100)]
#[case(&[&["ex1@a.bc", "ex3@a.bc"] as &[&str], &["ex7@a.bc", "ex3@a.bc"], &["ex9@a.bc", "ex11@a.bc"]], 150)]
#[case(&[&["ex1@a.bc", "ex3@a.bc"] as &[&str], &["ex2@a.bc", "ex4@a.bc"], &["ex3@a.bc", "ex5@a.bc"]], 0)]
#[case(
    &[
        &["ex1@a.bc", "ex3@a.bc"] as &[&str],
        &["ex2@a.bc", "ex4@a.bc"],
        &["ex3@a.bc", "ex5@a.bc"],
        // Repeats a pair from each round
        &["ex9@a.bc", "ex5@a.bc", "ex6@a.bc"],
    ],
    150
)]
fn test_history_score(#[case] candidate: &[&[&str]], #[case] expected: u64) {
    let history = two_round_history();
    assert_eq!(score(&partition_from(candidate), &history), expected);
}

#[rstest]
#[case(&["ex1@a.bc", "ex3@a.bc"], 0)]
#[case(&["ex1@a.bc", "ex2@a.bc"], 100)]
#[case(&["ex2@a.bc", "ex1@a.bc"], 100)]
#[case(&["ex1@a.bc", "ex2@a.bc", "ex9@a.bc"], 100)]
fn test_match_threshold(#[case] candidate: &[&str], #[case] expected: u64) {
    let history = vec![HistoryEntry::new(100, partition_from(&[&["ex1@a.bc", "ex2@a.bc"]]))];
    assert_eq!(score(&[group(candidate)], &history), expected);
}

#[test]
fn test_empty_history_scores_zero() {
    let partition = partition_from(&[&["ex1@a.bc", "ex2@a.bc"], &["ex3@a.bc", "ex4@a.bc", "ex5@a.bc"]]);
    assert_eq!(score(&partition, &[]), 0);
}

#[test]
fn test_entry_counts_once_per_group() {
    // A triple overlapping two groups of the same round still adds that
    // round's weight only once.
    let history = vec![HistoryEntry::new(
        10,
        partition_from(&[&["a", "b", "c"], &["b", "c", "d"]]),
    )];
    assert_eq!(score(&[group(&["a", "b", "c"])], &history), 10);
}

#[test]
fn test_score_is_repeatable() {
    let history = two_round_history();
    let partition = partition_from(&[&["ex9@a.bc", "ex5@a.bc", "ex6@a.bc"], &["ex1@a.bc", "ex2@a.bc"]]);
    let first = score(&partition, &history);
    for _ in 0..10 {
        assert_eq!(score(&partition, &history), first);
    }
}

// --- MATCHING ---

#[rstest]
#[case(&["ex5@a.bc", "ex6@a.bc"], true)]
#[case(&["ex5@a.bc", "ex2@a.bc"], false)]
#[case(&["ex5@a.bc", "ex6@a.bc", "ex7@a.bc"], true)]
#[case(&["ex9@a.bc", "ex11@a.bc"], true)]
fn test_has_group_in_partition(#[case] candidate: &[&str], #[case] expected: bool) {
    let sent = partition_from(&[
        &["ex1@a.bc", "ex2@a.bc"],
        &["ex3@a.bc", "ex4@a.bc"],
        &["ex5@a.bc", "ex6@a.bc"],
        &["ex7@a.bc", "ex8@a.bc"],
        &["ex9@a.bc", "ex10@a.bc", "ex11@a.bc"],
    ]);
    assert_eq!(has_group_in_partition(&group(candidate), &sent), expected);
}

#[test]
fn test_groups_match_is_symmetric() {
    let a = group(&["x", "y", "z"]);
    let b = group(&["z", "x"]);
    assert!(groups_match(&a, &b));
    assert!(groups_match(&b, &a));
}
