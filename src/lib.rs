//! # u-drills
//!
//! Small, self-contained numeric and text-formatting drills built on the
//! U-Engine primitives.
//!
//! The centrepiece is a Monte Carlo estimator for drawing colored balls
//! from a hat without replacement, checked against the exact
//! multivariate hypergeometric probability. The remaining modules are
//! deterministic formatting and arithmetic exercises.
//!
//! ## Modules
//!
//! - [`probability`]: hat model, random draws, experiment runner, exact probability
//! - [`random`]: seedable RNG and partial Fisher-Yates shuffling
//! - [`special`]: normal CDF, its inverse, log-gamma and log-binomial
//! - [`arithmetic`]: vertical arrangement of `+`/`-` problems
//! - [`budget`]: category ledgers and a spending bar chart
//! - [`shapes`]: rectangles and squares
//! - [`clock`]: 12-hour time arithmetic with weekdays
//!
//! ## Design Philosophy
//!
//! - **Reproducibility**: every random operation takes an explicit RNG, and
//!   hat contents iterate in label order, so a seed fixes the outcome
//! - **Ground truth**: estimates can be compared against the exact value
//! - **Property-based testing**: invariants verified via proptest

pub mod arithmetic;
pub mod budget;
pub mod clock;
pub mod probability;
pub mod random;
pub mod shapes;
pub mod special;
