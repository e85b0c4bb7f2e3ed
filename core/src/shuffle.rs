//! Random reordering of fetched lists.

use rand::Rng;

/// Return every element of `items` exactly once, in random order.
///
/// Repeatedly picks a uniformly random remaining index and moves that element
/// to the output, so each permutation is equally likely given a uniform `rng`.
pub fn shuffle<T, R: Rng + ?Sized>(mut items: Vec<T>, rng: &mut R) -> Vec<T> {
    let mut shuffled = Vec::with_capacity(items.len());
    while !items.is_empty() {
        let pick = rng.gen_range(0..items.len());
        shuffled.push(items.remove(pick));
    }
    shuffled
}

/// `shuffle` driven by the thread-local RNG.
pub fn shuffle_random<T>(items: Vec<T>) -> Vec<T> {
    shuffle(items, &mut rand::thread_rng())
}
