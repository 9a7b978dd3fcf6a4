//! Hats of labeled balls, the draws taken from them, and the minimum
//! counts a draw is checked against.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use rand::Rng;
use tracing::trace;

use super::{parse_pairs, ProbabilityError};
use crate::random;

/// A multiset of labeled balls.
///
/// Labels are kept sorted so that expanding the hat into individual balls
/// always yields the same sequence; together with a seeded RNG this makes
/// [`Hat::draw`] reproducible.
///
/// Cloning a hat gives an independent copy. [`experiment`](super::experiment)
/// relies on this to start every trial from the same composition.
///
/// # Examples
/// ```
/// use u_drills::probability::Hat;
/// let hat = Hat::new([("red", 5), ("blue", 2)]).unwrap();
/// assert_eq!(hat.total(), 7);
/// assert_eq!(hat.count("red"), 5);
/// assert_eq!(hat.count("green"), 0);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Hat {
    contents: BTreeMap<String, usize>,
}

impl Hat {
    /// Creates a hat from `(label, count)` pairs. Repeated labels are summed.
    ///
    /// # Errors
    /// Returns [`ProbabilityError::NegativeCount`] if any count is negative.
    pub fn new<I, K>(counts: I) -> Result<Self, ProbabilityError>
    where
        I: IntoIterator<Item = (K, i64)>,
        K: Into<String>,
    {
        let mut contents = BTreeMap::new();
        for (label, count) in counts {
            let label = label.into();
            if count < 0 {
                return Err(ProbabilityError::NegativeCount { label, count });
            }
            *contents.entry(label).or_insert(0) += count as usize;
        }
        Ok(Self { contents })
    }

    /// Number of balls with the given label currently in the hat.
    pub fn count(&self, label: &str) -> usize {
        self.contents.get(label).copied().unwrap_or(0)
    }

    /// Total number of balls currently in the hat.
    pub fn total(&self) -> usize {
        self.contents.values().sum()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    /// Labels the hat was created with, in sorted order. Labels whose balls
    /// have all been drawn are still listed.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.contents.keys().map(String::as_str)
    }

    /// `(label, count)` pairs in label order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.contents.iter().map(|(label, &count)| (label.as_str(), count))
    }

    /// Draws `n` balls uniformly at random without replacement and removes
    /// them from the hat.
    ///
    /// If `n` is at least the number of balls left, every remaining ball is
    /// drawn and the hat ends up empty. Asking for too many is not an error.
    ///
    /// # Algorithm
    /// Expands the hat into one entry per ball, runs a partial Fisher-Yates
    /// shuffle over the first `min(n, total)` positions, and takes that
    /// prefix as the draw (in draw order).
    ///
    /// # Examples
    /// ```
    /// use u_drills::probability::Hat;
    /// use u_drills::random::create_rng;
    ///
    /// let mut hat = Hat::new([("red", 2), ("blue", 1)]).unwrap();
    /// let mut rng = create_rng(3);
    ///
    /// let first = hat.draw(2, &mut rng);
    /// assert_eq!(first.len(), 2);
    /// assert_eq!(hat.total(), 1);
    ///
    /// let rest = hat.draw(10, &mut rng);
    /// assert_eq!(rest.len(), 1);
    /// assert!(hat.is_empty());
    /// ```
    pub fn draw<R: Rng>(&mut self, n: usize, rng: &mut R) -> Draw {
        let mut balls: Vec<String> = self
            .contents
            .iter()
            .flat_map(|(label, &count)| std::iter::repeat(label).take(count))
            .cloned()
            .collect();

        let taken = random::partial_shuffle(&mut balls, n, rng);
        balls.truncate(taken);

        for label in &balls {
            if let Some(count) = self.contents.get_mut(label) {
                *count -= 1;
            }
        }

        trace!(requested = n, drawn = taken, remaining = self.total(), "drew from hat");
        Draw { balls }
    }
}

impl fmt::Display for Hat {
    /// Formats as `label=count` pairs, e.g. `black=6,green=3,red=4`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (label, count)) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{label}={count}")?;
        }
        Ok(())
    }
}

impl FromStr for Hat {
    type Err = ProbabilityError;

    /// Parses `"black=6,red=4,green=3"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Hat::new(parse_pairs(s)?)
    }
}

/// The balls drawn in one call to [`Hat::draw`], in draw order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Draw {
    balls: Vec<String>,
}

impl Draw {
    /// Labels in the order they were drawn.
    pub fn balls(&self) -> &[String] {
        &self.balls
    }

    pub fn into_balls(self) -> Vec<String> {
        self.balls
    }

    pub fn len(&self) -> usize {
        self.balls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.balls.is_empty()
    }

    /// How many balls with `label` were drawn.
    pub fn count(&self, label: &str) -> usize {
        self.balls.iter().filter(|b| b.as_str() == label).count()
    }

    /// Per-label counts of the draw.
    pub fn tally(&self) -> BTreeMap<&str, usize> {
        let mut tally = BTreeMap::new();
        for ball in &self.balls {
            *tally.entry(ball.as_str()).or_insert(0) += 1;
        }
        tally
    }
}

/// Minimum number of balls per label that a draw must contain.
///
/// A draw meets the expectation when, for every listed label, it contains
/// at least that many balls. Labels the hat never had are allowed; any
/// minimum above zero for them simply can't be met.
///
/// # Examples
/// ```
/// use u_drills::probability::{Expectation, Hat};
/// use u_drills::random::create_rng;
///
/// let expected = Expectation::new([("red", 1)]).unwrap();
/// let mut hat = Hat::new([("red", 3)]).unwrap();
/// let draw = hat.draw(1, &mut create_rng(0));
/// assert!(expected.is_met_by(&draw));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Expectation {
    minimums: BTreeMap<String, usize>,
}

impl Expectation {
    /// Creates an expectation from `(label, minimum)` pairs. Repeated labels
    /// keep the largest minimum.
    ///
    /// # Errors
    /// Returns [`ProbabilityError::NegativeMinimum`] if any minimum is negative.
    pub fn new<I, K>(minimums: I) -> Result<Self, ProbabilityError>
    where
        I: IntoIterator<Item = (K, i64)>,
        K: Into<String>,
    {
        let mut map = BTreeMap::new();
        for (label, minimum) in minimums {
            let label = label.into();
            if minimum < 0 {
                return Err(ProbabilityError::NegativeMinimum { label, minimum });
            }
            let entry = map.entry(label).or_insert(0);
            *entry = (*entry).max(minimum as usize);
        }
        Ok(Self { minimums: map })
    }

    /// Minimum required for `label` (0 if unlisted).
    pub fn minimum(&self, label: &str) -> usize {
        self.minimums.get(label).copied().unwrap_or(0)
    }

    /// `(label, minimum)` pairs in label order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.minimums.iter().map(|(label, &min)| (label.as_str(), min))
    }

    pub fn is_empty(&self) -> bool {
        self.minimums.is_empty()
    }

    /// True when every listed label appears in `draw` at least its minimum
    /// number of times.
    pub fn is_met_by(&self, draw: &Draw) -> bool {
        let tally = draw.tally();
        self.iter()
            .all(|(label, min)| tally.get(label).copied().unwrap_or(0) >= min)
    }
}

impl FromStr for Expectation {
    type Err = ProbabilityError;

    /// Parses `"red=2,green=1"`. Blank input is the empty expectation.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Expectation::new(parse_pairs(s)?)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::create_rng;

    fn sample_hat() -> Hat {
        Hat::new([("black", 6), ("red", 4), ("green", 3)]).unwrap()
    }

    #[test]
    fn test_new_rejects_negative_count() {
        let err = Hat::new([("red", 2), ("blue", -1)]).unwrap_err();
        assert_eq!(
            err,
            ProbabilityError::NegativeCount {
                label: "blue".into(),
                count: -1
            }
        );
    }

    #[test]
    fn test_new_sums_repeated_labels() {
        let hat = Hat::new([("red", 2), ("red", 3)]).unwrap();
        assert_eq!(hat.count("red"), 5);
        assert_eq!(hat.total(), 5);
    }

    #[test]
    fn test_zero_count_label_is_listed_but_empty() {
        let hat = Hat::new([("ghost", 0)]).unwrap();
        assert!(hat.is_empty());
        assert_eq!(hat.labels().collect::<Vec<_>>(), vec!["ghost"]);
    }

    #[test]
    fn test_parse_and_display() {
        let hat: Hat = "red=4, black=6,green=3".parse().unwrap();
        assert_eq!(hat, sample_hat());
        assert_eq!(hat.to_string(), "black=6,green=3,red=4");
    }

    #[test]
    fn test_parse_rejects_negative() {
        let err = "red=-4".parse::<Hat>().unwrap_err();
        assert!(matches!(err, ProbabilityError::NegativeCount { .. }));
    }

    #[test]
    fn test_draw_removes_drawn_balls() {
        let mut hat = sample_hat();
        let mut rng = create_rng(11);
        let draw = hat.draw(5, &mut rng);

        assert_eq!(draw.len(), 5);
        assert_eq!(hat.total(), 8);
        for label in ["black", "red", "green"] {
            assert_eq!(
                hat.count(label) + draw.count(label),
                sample_hat().count(label),
                "label {label} not conserved"
            );
        }
    }

    #[test]
    fn test_draw_more_than_available_empties_hat() {
        let mut hat = sample_hat();
        let mut rng = create_rng(5);
        let draw = hat.draw(100, &mut rng);

        assert_eq!(draw.len(), 13);
        assert!(hat.is_empty());
        assert_eq!(draw.count("black"), 6);
        assert_eq!(draw.count("red"), 4);
        assert_eq!(draw.count("green"), 3);
    }

    #[test]
    fn test_draw_zero() {
        let mut hat = sample_hat();
        let draw = hat.draw(0, &mut create_rng(0));
        assert!(draw.is_empty());
        assert_eq!(hat, sample_hat());
    }

    #[test]
    fn test_draw_from_empty_hat() {
        let mut hat = Hat::default();
        let draw = hat.draw(3, &mut create_rng(0));
        assert!(draw.is_empty());
    }

    #[test]
    fn test_draw_is_reproducible() {
        let mut a = sample_hat();
        let mut b = sample_hat();
        let da = a.draw(6, &mut create_rng(2024));
        let db = b.draw(6, &mut create_rng(2024));
        assert_eq!(da, db);
        assert_eq!(a, b);
    }

    #[test]
    fn test_clone_is_independent() {
        let template = sample_hat();
        let mut working = template.clone();
        working.draw(7, &mut create_rng(1));
        assert_eq!(template.total(), 13);
        assert_eq!(working.total(), 6);
    }

    #[test]
    fn test_draw_tally() {
        let mut hat = Hat::new([("a", 2)]).unwrap();
        let draw = hat.draw(2, &mut create_rng(0));
        let tally = draw.tally();
        assert_eq!(tally.get("a"), Some(&2));
        assert_eq!(tally.len(), 1);
        assert_eq!(draw.into_balls(), vec!["a".to_string(), "a".to_string()]);
    }

    #[test]
    fn test_expectation_rejects_negative_minimum() {
        let err = Expectation::new([("red", -2)]).unwrap_err();
        assert!(matches!(err, ProbabilityError::NegativeMinimum { .. }));
    }

    #[test]
    fn test_expectation_keeps_largest_repeat() {
        let e = Expectation::new([("red", 1), ("red", 3)]).unwrap();
        assert_eq!(e.minimum("red"), 3);
        assert_eq!(e.minimum("blue"), 0);
    }

    #[test]
    fn test_expectation_met_rules() {
        let mut hat = Hat::new([("red", 3)]).unwrap();
        let draw = hat.draw(2, &mut create_rng(0));

        assert!(Expectation::default().is_met_by(&draw));
        assert!(Expectation::new([("red", 2)]).unwrap().is_met_by(&draw));
        assert!(!Expectation::new([("red", 3)]).unwrap().is_met_by(&draw));
        // Unknown label with a positive minimum can never be met.
        assert!(!Expectation::new([("blue", 1)]).unwrap().is_met_by(&draw));
        // A zero minimum is met by anything.
        assert!(Expectation::new([("blue", 0)]).unwrap().is_met_by(&draw));
    }

    #[test]
    fn test_expectation_parse_blank() {
        let e: Expectation = "".parse().unwrap();
        assert!(e.is_empty());
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use crate::random::create_rng;
    use proptest::prelude::*;

    fn hat_strategy() -> impl Strategy<Value = Hat> {
        proptest::collection::btree_map("[a-e]", 0_i64..8, 0..5)
            .prop_map(|m| Hat::new(m).unwrap())
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(300))]

        #[test]
        fn drawing_at_least_total_empties_hat(
            hat in hat_strategy(),
            extra in 0_usize..5,
            seed in 0_u64..10000,
        ) {
            let mut working = hat.clone();
            let n = hat.total() + extra;
            let draw = working.draw(n, &mut create_rng(seed));
            prop_assert!(working.is_empty());
            prop_assert_eq!(draw.len(), hat.total());
        }

        #[test]
        fn sequential_draws_never_exceed_initial_contents(
            hat in hat_strategy(),
            sizes in proptest::collection::vec(0_usize..6, 1..6),
            seed in 0_u64..10000,
        ) {
            let mut working = hat.clone();
            let mut rng = create_rng(seed);
            let mut drawn = 0;
            for n in sizes {
                let draw = working.draw(n, &mut rng);
                prop_assert!(draw.len() <= n);
                drawn += draw.len();
            }
            prop_assert!(drawn <= hat.total());
            prop_assert_eq!(drawn + working.total(), hat.total());
        }

        #[test]
        fn draw_is_deterministic_for_seed(
            hat in hat_strategy(),
            n in 0_usize..10,
            seed in 0_u64..10000,
        ) {
            let mut a = hat.clone();
            let mut b = hat.clone();
            prop_assert_eq!(a.draw(n, &mut create_rng(seed)), b.draw(n, &mut create_rng(seed)));
        }

        #[test]
        fn display_parse_roundtrip(hat in hat_strategy()) {
            let parsed: Hat = hat.to_string().parse().unwrap();
            prop_assert_eq!(parsed, hat);
        }
    }
}
