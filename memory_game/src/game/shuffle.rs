//! Card order randomization.

use rand::{Rng, seq::SliceRandom};

/// Return a shuffled copy of `items`.
///
/// The input slice is left untouched; the result holds every element
/// exactly once.
///
/// # Arguments
///
/// * `items` - Sequence to permute
/// * `rng` - Source of randomness
///
/// # Returns
///
/// * `Vec<T>` - New vector with the same elements in random order
pub fn shuffled<T: Clone, R: Rng + ?Sized>(items: &[T], rng: &mut R) -> Vec<T> {
    let mut order = items.to_vec();
    order.shuffle(rng);
    order
}

/// [`shuffled`] using the thread-local generator.
pub fn shuffled_thread_rng<T: Clone>(items: &[T]) -> Vec<T> {
    shuffled(items, &mut rand::rng())
}
