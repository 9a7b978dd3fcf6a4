//! The Monte Carlo driver and its result type.

use rand::Rng;
use tracing::debug;

use super::{Expectation, Hat, ProbabilityError};
use crate::random;
use crate::special;

/// Estimates the probability that `draws` balls taken from `hat` meet
/// `expected`, by running `trials` independent trials.
///
/// Every trial works on a fresh clone of `hat`, so `hat` itself is never
/// modified and no trial sees another trial's draws.
///
/// A draw count larger than the hat draws the whole hat (see [`Hat::draw`]).
/// A draw count of zero succeeds exactly when every minimum in `expected`
/// is zero.
///
/// # Errors
/// Returns [`ProbabilityError::ZeroTrials`] if `trials == 0`.
///
/// # Examples
/// ```
/// use u_drills::probability::{experiment, Expectation, Hat};
/// use u_drills::random::create_rng;
///
/// let hat = Hat::new([("blue", 3)]).unwrap();
/// let expected = Expectation::new([("blue", 5)]).unwrap();
/// let estimate = experiment(&hat, &expected, 3, 100, &mut create_rng(1)).unwrap();
/// assert_eq!(estimate.probability(), 0.0);
/// ```
pub fn experiment<R: Rng>(
    hat: &Hat,
    expected: &Expectation,
    draws: usize,
    trials: usize,
    rng: &mut R,
) -> Result<Estimate, ProbabilityError> {
    if trials == 0 {
        return Err(ProbabilityError::ZeroTrials);
    }

    let mut successes = 0;
    for _ in 0..trials {
        let mut working = hat.clone();
        let drawn = working.draw(draws, rng);
        if expected.is_met_by(&drawn) {
            successes += 1;
        }
    }

    let estimate = Estimate { successes, trials };
    debug!(
        draws,
        trials,
        successes,
        probability = estimate.probability(),
        "experiment finished"
    );
    Ok(estimate)
}

/// Numeric parameters of an experiment.
///
/// `seed: None` draws from OS entropy, so results differ between runs.
///
/// # Examples
/// ```
/// use u_drills::probability::{ExperimentConfig, Expectation, Hat};
///
/// let hat: Hat = "black=6,red=4,green=3".parse().unwrap();
/// let expected: Expectation = "red=2,green=1".parse().unwrap();
///
/// let config = ExperimentConfig::new(5, 2000).unwrap().with_seed(7);
/// let a = config.run(&hat, &expected).unwrap();
/// let b = config.run(&hat, &expected).unwrap();
/// assert_eq!(a, b);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExperimentConfig {
    /// Balls drawn per trial.
    pub draws: usize,
    /// Number of trials.
    pub trials: usize,
    /// RNG seed for reproducible runs.
    #[cfg_attr(feature = "serde", serde(default))]
    pub seed: Option<u64>,
}

impl ExperimentConfig {
    /// # Errors
    /// Returns [`ProbabilityError::ZeroTrials`] if `trials == 0`.
    pub fn new(draws: usize, trials: usize) -> Result<Self, ProbabilityError> {
        let config = Self {
            draws,
            trials,
            seed: None,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Checks parameters that may have been set directly (or deserialized).
    pub fn validate(&self) -> Result<(), ProbabilityError> {
        if self.trials == 0 {
            return Err(ProbabilityError::ZeroTrials);
        }
        Ok(())
    }

    /// Runs [`experiment`] with an RNG built from this config.
    pub fn run(&self, hat: &Hat, expected: &Expectation) -> Result<Estimate, ProbabilityError> {
        self.validate()?;
        match self.seed {
            Some(seed) => {
                let mut rng = random::create_rng(seed);
                experiment(hat, expected, self.draws, self.trials, &mut rng)
            }
            None => {
                let mut rng = random::entropy_rng();
                experiment(hat, expected, self.draws, self.trials, &mut rng)
            }
        }
    }
}

/// Outcome of an experiment: how many of how many trials succeeded.
///
/// Always has at least one trial.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Estimate {
    successes: usize,
    trials: usize,
}

impl Estimate {
    pub fn successes(&self) -> usize {
        self.successes
    }

    pub fn trials(&self) -> usize {
        self.trials
    }

    /// Success fraction `successes / trials`, in `[0, 1]`.
    pub fn probability(&self) -> f64 {
        self.successes as f64 / self.trials as f64
    }

    /// Binomial standard error `sqrt(p̂(1−p̂)/n)`.
    pub fn standard_error(&self) -> f64 {
        let p = self.probability();
        (p * (1.0 - p) / self.trials as f64).sqrt()
    }

    /// Wilson score interval for the true probability.
    ///
    /// Unlike `p̂ ± z·SE`, it stays inside `[0, 1]` and has non-zero width
    /// when every trial failed or every trial succeeded.
    ///
    /// Reference: Wilson (1927), "Probable Inference, the Law of Succession,
    /// and Statistical Inference", *JASA* 22(158).
    ///
    /// # Returns
    /// `None` if `confidence` is not strictly between 0 and 1.
    pub fn wilson_interval(&self, confidence: f64) -> Option<(f64, f64)> {
        if !(confidence > 0.0 && confidence < 1.0) {
            return None;
        }
        let z = special::inverse_normal_cdf(1.0 - (1.0 - confidence) / 2.0);
        let n = self.trials as f64;
        let p = self.probability();
        let z2 = z * z;

        let denom = 1.0 + z2 / n;
        let center = (p + z2 / (2.0 * n)) / denom;
        let half = z * (p * (1.0 - p) / n + z2 / (4.0 * n * n)).sqrt() / denom;

        Some(((center - half).max(0.0), (center + half).min(1.0)))
    }

    /// Two-sided p-value of the estimate under the hypothesis that the true
    /// probability is `p0`, using the normal approximation to the binomial.
    ///
    /// For `p0` of exactly 0 or 1 the outcome is deterministic, so the
    /// result is 1.0 if the estimate matches and 0.0 otherwise.
    pub fn two_sided_p_value(&self, p0: f64) -> f64 {
        let p = self.probability();
        if p0 <= 0.0 || p0 >= 1.0 {
            return if (p - p0).abs() < f64::EPSILON { 1.0 } else { 0.0 };
        }
        let se = (p0 * (1.0 - p0) / self.trials as f64).sqrt();
        let z = (p - p0).abs() / se;
        (2.0 * (1.0 - special::standard_normal_cdf(z))).clamp(0.0, 1.0)
    }
}

impl std::fmt::Display for Estimate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({}/{})", self.probability(), self.successes, self.trials)
    }
}

// ============================================================================
// Tests
// ============================================================================
