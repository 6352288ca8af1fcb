use std::collections::BTreeSet;

use rand::prelude::*;
use rand::seq::index;


/// Draws winners without replacement, every subset of the requested size
/// equally likely. Backed by `rand`'s partial index sampling, not a
/// comparator shuffle, which would bias the draw.
pub fn select_winners(participants: &BTreeSet<String>, count: usize) -> Vec<String> {
    select_winners_with(participants, count, &mut StdRng::from_entropy())
}

/// Same draw with an injected rng, for deterministic tests. `count` is
/// capped at the number of participants; zero yields an empty list.
pub fn select_winners_with<R: Rng + ?Sized>(
    participants: &BTreeSet<String>,
    count: usize,
    rng: &mut R,
) -> Vec<String> {
    let pool: Vec<&String> = participants.iter().collect();
    let count = count.min(pool.len());
    index::sample(rng, pool.len(), count)
        .into_iter()
        .map(|index| pool[index].clone())
        .collect()
}
