//! Play order generation
//!
//! The playlist itself is never reordered. Shuffling produces a permutation
//! of playlist indices that playback walks through instead.

use rand::seq::SliceRandom;
use rand::{thread_rng, Rng};

/// The unshuffled play order `[0, 1, .., len - 1]`
pub fn identity_order(len: usize) -> Vec<usize> {
    (0..len).collect()
}

/// A uniformly random play order using Fisher-Yates
pub fn shuffle_order(len: usize) -> Vec<usize> {
    shuffle_order_with(len, &mut thread_rng())
}

/// Fisher-Yates shuffle of `[0, .., len - 1]` with a caller-supplied RNG
pub fn shuffle_order_with<R: Rng + ?Sized>(len: usize, rng: &mut R) -> Vec<usize> {
    let mut order = identity_order(len);
    order.shuffle(rng);
    order
}

/// Whether `order` contains every index in `0..len` exactly once
pub fn is_permutation(order: &[usize], len: usize) -> bool {
    if order.len() != len {
        return false;
    }

    let mut seen = vec![false; len];
    for &i in order {
        if i >= len || seen[i] {
            return false;
        }
        seen[i] = true;
    }
    true
}
