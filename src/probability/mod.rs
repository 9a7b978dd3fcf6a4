//! Monte Carlo estimation of draw-without-replacement probabilities.
//!
//! A [`Hat`] holds labeled balls. An [`experiment`] clones the hat for every
//! trial, draws a fixed number of balls without replacement, and counts the
//! trials whose draw meets an [`Expectation`] (a minimum count per label).
//! The result is an [`Estimate`] of the success probability.
//!
//! [`exact_probability`] computes the same event analytically from the
//! multivariate hypergeometric distribution, which is handy for checking how
//! far an estimate has converged.
//!
//! # Example
//!
//! ```
//! use u_drills::probability::{experiment, exact_probability, Expectation, Hat};
//! use u_drills::random::create_rng;
//!
//! let hat: Hat = "black=6,red=4,green=3".parse().unwrap();
//! let expected: Expectation = "red=2,green=1".parse().unwrap();
//!
//! let mut rng = create_rng(42);
//! let estimate = experiment(&hat, &expected, 5, 2000, &mut rng).unwrap();
//! let exact = exact_probability(&hat, &expected, 5);
//!
//! assert!((estimate.probability() - exact).abs() < 0.05);
//! ```

mod exact;
mod experiment;
mod hat;

pub use exact::exact_probability;
pub use experiment::{experiment, Estimate, ExperimentConfig};
pub use hat::{Draw, Expectation, Hat};

/// Error type for invalid hat compositions, expectations, and experiment
/// parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbabilityError {
    /// A hat was given a negative number of balls for a label.
    NegativeCount { label: String, count: i64 },
    /// An expectation was given a negative minimum for a label.
    NegativeMinimum { label: String, minimum: i64 },
    /// An experiment was asked to run zero trials.
    ZeroTrials,
    /// Text could not be parsed as `label=count` pairs.
    Parse(String),
}

impl std::fmt::Display for ProbabilityError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProbabilityError::NegativeCount { label, count } => {
                write!(f, "ball count for '{label}' must be non-negative, got {count}")
            }
            ProbabilityError::NegativeMinimum { label, minimum } => {
                write!(f, "expected minimum for '{label}' must be non-negative, got {minimum}")
            }
            ProbabilityError::ZeroTrials => {
                write!(f, "experiment requires at least one trial")
            }
            ProbabilityError::Parse(msg) => write!(f, "invalid label=count list: {msg}"),
        }
    }
}

impl std::error::Error for ProbabilityError {}

/// Parses `"a=1, b=2"` into `[("a", 1), ("b", 2)]`.
///
/// Blank input yields an empty list. Counts may be negative here; callers
/// decide which error that is.
pub(crate) fn parse_pairs(s: &str) -> Result<Vec<(String, i64)>, ProbabilityError> {
    let s = s.trim();
    if s.is_empty() {
        return Ok(Vec::new());
    }

    s.split(',')
        .map(|item| {
            let item = item.trim();
            let (label, count) = item
                .split_once('=')
                .ok_or_else(|| ProbabilityError::Parse(format!("'{item}' is not label=count")))?;
            let label = label.trim();
            if label.is_empty() {
                return Err(ProbabilityError::Parse(format!("'{item}' has an empty label")));
            }
            let count = count
                .trim()
                .parse::<i64>()
                .map_err(|e| ProbabilityError::Parse(format!("'{item}': {e}")))?;
            Ok((label.to_string(), count))
        })
        .collect()
}
