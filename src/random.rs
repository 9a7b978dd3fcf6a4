//! Random number generation and sampling without replacement.
//!
//! Provides seeded RNG construction and the partial Fisher-Yates shuffle
//! used to draw balls out of a [`Hat`](crate::probability::Hat).
//!
//! # Reproducibility
//!
//! For reproducible experiments, use [`create_rng`] with a fixed seed.
//! The underlying algorithm (SmallRng) is deterministic for a given seed
//! on the same platform.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Creates a fast, seeded random number generator.
///
/// Uses `SmallRng` (Xoshiro256++) for high performance.
/// The sequence is deterministic for a given seed on the same platform.
///
/// # Examples
/// ```
/// use u_drills::random::create_rng;
/// use rand::Rng;
/// let mut rng = create_rng(42);
/// let x: f64 = rng.random();
/// assert!(x >= 0.0 && x < 1.0);
/// ```
pub fn create_rng(seed: u64) -> SmallRng {
    SmallRng::seed_from_u64(seed)
}

/// Creates a `SmallRng` seeded from the operating system's entropy source.
///
/// Use this when no seed was configured and runs are not meant to be
/// reproducible.
pub fn entropy_rng() -> SmallRng {
    SmallRng::from_os_rng()
}

/// Partial Fisher-Yates shuffle: moves a uniform random sample of
/// `amount` elements (without replacement) into `slice[..amount]`.
///
/// Only the first `amount` positions are randomized; the tail holds the
/// elements that were not chosen, in unspecified order. `amount` is
/// clamped to `slice.len()`, and the number of chosen elements is returned.
///
/// Every `amount`-subset is equally likely, and so is every ordering of
/// that subset, so the prefix is a valid sequence of draws.
///
/// Reference: Knuth (1997), *TAOCP* Vol. 2, §3.4.2, Algorithm P, stopped
/// after `amount` steps.
///
/// # Complexity
/// Time: O(amount), Space: O(1)
///
/// # Examples
/// ```
/// use u_drills::random::{create_rng, partial_shuffle};
/// let mut v: Vec<u32> = (0..10).collect();
/// let mut rng = create_rng(7);
/// let taken = partial_shuffle(&mut v, 3, &mut rng);
/// assert_eq!(taken, 3);
/// v.sort();
/// assert_eq!(v, (0..10).collect::<Vec<_>>());
/// ```
pub fn partial_shuffle<T, R: Rng>(slice: &mut [T], amount: usize, rng: &mut R) -> usize {
    let n = slice.len();
    let amount = amount.min(n);
    for i in 0..amount {
        let j = rng.random_range(i..n);
        slice.swap(i, j);
    }
    amount
}

// ============================================================================
// Tests
// ============================================================================
