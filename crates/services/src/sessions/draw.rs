//! Unbiased drawing primitives: shuffling, sampling, option permutation.
//!
//! Everything here is generic over [`rand::Rng`] so behavior is
//! deterministic under a seeded generator; production call sites pass
//! `rand::rng()`.

use rand::Rng;

use medq_core::model::{OptionsError, Question, ShuffledOptions};

/// Uniformly random permutation of `items`, as a new vector.
///
/// Classic Fisher-Yates over a copy: walk i from the last index down to 1,
/// draw j uniform in `[0, i]`, swap. Each of the n! permutations is equally
/// likely given a uniform generator.
pub fn shuffle<T: Clone, R: Rng + ?Sized>(rng: &mut R, items: &[T]) -> Vec<T> {
    let mut out: Vec<T> = items.to_vec();
    for i in (1..out.len()).rev() {
        let j = rng.random_range(0..=i);
        out.swap(i, j);
    }
    out
}

/// Draw `min(k, len)` distinct elements uniformly without replacement.
///
/// A count larger than the pool silently clamps; an empty pool yields an
/// empty draw, and treating that as an error is the caller's business.
pub fn sample_without_replacement<T: Clone, R: Rng + ?Sized>(
    rng: &mut R,
    pool: &[T],
    k: usize,
) -> Vec<T> {
    let mut drawn = shuffle(rng, pool);
    drawn.truncate(k.min(pool.len()));
    drawn
}

/// Uniformly random permutation of the indices `0..len`.
///
/// `result[slot]` is the original index displayed at `slot`.
pub fn permutation<R: Rng + ?Sized>(rng: &mut R, len: usize) -> Vec<usize> {
    let indices: Vec<usize> = (0..len).collect();
    shuffle(rng, &indices)
}

/// Shuffle a question's answer options, keeping the original-to-display
/// index map.
///
/// # Errors
///
/// Returns `OptionsError` if the drawn order fails the permutation check;
/// with a correct generator this does not happen, but the validating
/// constructor keeps the invariant explicit.
pub fn shuffle_options<R: Rng + ?Sized>(
    rng: &mut R,
    question: &Question,
) -> Result<ShuffledOptions, OptionsError> {
    let order = permutation(rng, question.options().len());
    ShuffledOptions::from_order(question.options(), &order)
}
