use rand::Rng;

/// Unbiased in-place Fisher-Yates shuffle.
///
/// Walks `i` from the last index down to 1 and swaps it with a uniformly
/// drawn `j` in `0..=i`. Slices of length 0 or 1 are left untouched.
pub fn shuffle<T, R: Rng>(items: &mut [T], rng: &mut R) {
    for i in (1..items.len()).rev() {
        let j = rng.random_range(0..=i);
        items.swap(i, j);
    }
}

/// A uniformly random permutation of `0..len`.
#[must_use]
pub fn shuffled_indices<R: Rng>(len: usize, rng: &mut R) -> Vec<usize> {
    let mut order: Vec<usize> = (0..len).collect();
    shuffle(&mut order, rng);
    order
}
