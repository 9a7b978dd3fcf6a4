//! Exact success probability from the multivariate hypergeometric
//! distribution.

use super::{Expectation, Hat};
use crate::special::ln_choose;

/// Probability that `draws` balls taken without replacement from `hat`
/// meet `expected`, computed exactly.
///
/// Labels with a minimum of zero are ignored. The remaining labels are
/// folded in one at a time, and all other balls are pooled into a single
/// "rest" group:
///
/// ```text
/// P = Σ  Π C(nᵢ, kᵢ) · C(rest, n − Σkᵢ) / C(N, n)
///    kᵢ ≥ mᵢ
/// ```
///
/// A draw count above the hat size is clamped, matching [`Hat::draw`].
///
/// # Algorithm
/// Dynamic programming over the number of balls taken from the constrained
/// labels so far. `ways[j]` holds ln Σ Π C(nᵢ, kᵢ) over all assignments with
/// Σkᵢ = j. Sums are accumulated in log space so large hats don't overflow.
///
/// # Complexity
/// Time: O(g · n²) for g constrained labels, Space: O(n)
///
/// # Examples
/// ```
/// use u_drills::probability::{exact_probability, Expectation, Hat};
/// let hat = Hat::new([("black", 6), ("red", 4), ("green", 3)]).unwrap();
/// let expected = Expectation::new([("red", 2), ("green", 1)]).unwrap();
/// // 471 of the C(13, 5) = 1287 hands qualify.
/// let p = exact_probability(&hat, &expected, 5);
/// assert!((p - 471.0 / 1287.0).abs() < 1e-9);
/// ```
pub fn exact_probability(hat: &Hat, expected: &Expectation, draws: usize) -> f64 {
    let total = hat.total() as u64;
    let draws = (draws as u64).min(total);

    let mut groups = Vec::new();
    let mut constrained = 0;
    for (label, minimum) in expected.iter().filter(|&(_, m)| m > 0) {
        let available = hat.count(label) as u64;
        if available < minimum as u64 {
            return 0.0;
        }
        groups.push((available, minimum as u64));
        constrained += available;
    }
    if groups.is_empty() {
        return 1.0;
    }

    let n = draws as usize;
    let mut ways = vec![f64::NEG_INFINITY; n + 1];
    ways[0] = 0.0;
    for &(available, minimum) in &groups {
        let mut next = vec![f64::NEG_INFINITY; n + 1];
        for (taken, &ln_ways) in ways.iter().enumerate() {
            if ln_ways == f64::NEG_INFINITY {
                continue;
            }
            let upper = available.min((n - taken) as u64);
            for k in minimum..=upper {
                let slot = &mut next[taken + k as usize];
                *slot = ln_add_exp(*slot, ln_ways + ln_choose(available, k));
            }
        }
        ways = next;
    }

    let rest = total - constrained;
    let ln_hands = ln_choose(total, draws);
    let p: f64 = ways
        .iter()
        .enumerate()
        .filter(|&(_, &ln_ways)| ln_ways > f64::NEG_INFINITY)
        .map(|(taken, &ln_ways)| {
            let left = draws - taken as u64;
            if left > rest {
                0.0
            } else {
                (ln_ways + ln_choose(rest, left) - ln_hands).exp()
            }
        })
        .sum();
    p.clamp(0.0, 1.0)
}

/// ln(eᵃ + eᵇ) without overflow.
fn ln_add_exp(a: f64, b: f64) -> f64 {
    if a == f64::NEG_INFINITY {
        return b;
    }
    if b == f64::NEG_INFINITY {
        return a;
    }
    let (hi, lo) = if a > b { (a, b) } else { (b, a) };
    hi + (lo - hi).exp().ln_1p()
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        #[test]
        fn exact_in_unit_interval(
            counts in proptest::collection::btree_map("[a-d]", 0_i64..7, 1..4),
            minimums in proptest::collection::btree_map("[a-d]", 0_i64..4, 0..3),
            draws in 0_usize..15,
        ) {
            let hat = Hat::new(counts).unwrap();
            let expected = Expectation::new(minimums).unwrap();
            let p = exact_probability(&hat, &expected, draws);
            prop_assert!((0.0..=1.0).contains(&p));
        }

        #[test]
        fn single_minimum_of_one_matches_complement(
            target in 0_i64..6,
            others in 0_i64..6,
            draws in 0_usize..12,
        ) {
            // P(at least one target) = 1 - C(others, n) / C(total, n)
            let hat = Hat::new([("t", target), ("o", others)]).unwrap();
            let expected = Expectation::new([("t", 1)]).unwrap();
            let total = (target + others) as u64;
            let n = (draws as u64).min(total);
            let none = if n > others as u64 {
                0.0
            } else {
                (ln_choose(others as u64, n) - ln_choose(total, n)).exp()
            };
            let expected_p = if target == 0 { 0.0 } else { 1.0 - none };
            let p = exact_probability(&hat, &expected, draws);
            prop_assert!((p - expected_p).abs() < 1e-9, "got {p}, want {expected_p}");
        }
    }
}
