use crate::core_types::{Identifier, Partition};
use fastrand::Rng;

/// In-place Fisher-Yates shuffle driven by the caller's RNG.
pub fn shuffle_identifiers(ids: &mut [Identifier], rng: &mut Rng) {
    for i in (1..ids.len()).rev() {
        let j = rng.usize(0..=i);
        ids.swap(i, j);
    }
}

/// Random partition of `identifiers` into pairs.
///
/// With an odd count the leftover identifier joins the last pair formed, so
/// exactly one triple exists. Fewer than two identifiers yield an empty
/// partition.
pub fn generate_partition(identifiers: &[Identifier], rng: &mut Rng) -> Partition {
    if identifiers.len() < 2 {
        return Vec::new();
    }

    let mut shuffled = identifiers.to_vec();
    shuffle_identifiers(&mut shuffled, rng);

    let mut partition: Partition = Vec::with_capacity(shuffled.len() / 2);
    let mut remaining = shuffled.into_iter();

    loop {
        match (remaining.next(), remaining.next()) {
            (Some(a), Some(b)) => partition.push(vec![a, b]),
            (Some(leftover), None) => {
                if let Some(last) = partition.last_mut() {
                    last.push(leftover);
                }
                break;
            }
            _ => break,
        }
    }

    partition
}
