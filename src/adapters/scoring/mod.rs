//! Scoring strategies
//!
//! - [`RandomScorer`] - placeholder scores in `[70, 100)`
//! - [`FixedScorer`] - a score chosen by the reviewer

use rand::Rng;

use crate::core::models::{Phase, VerificationRequest};
use crate::core::ports::PhaseScorer;

/// Lowest score the random placeholder produces
pub const RANDOM_MIN: u8 = 70;
/// Exclusive upper bound of the random placeholder
pub const RANDOM_MAX: u8 = 100;

/// Pseudo-random scores in `[70, 100)`
///
/// Stands in for real authenticity checks. Retrying a phase can yield a
/// different outcome.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomScorer;

impl PhaseScorer for RandomScorer {
    fn score(&self, _request: &VerificationRequest, _phase: Phase) -> u8 {
        rand::thread_rng().gen_range(RANDOM_MIN..RANDOM_MAX)
    }

    fn name(&self) -> &'static str {
        "random"
    }
}

/// Always returns the same score
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedScorer(pub u8);

impl PhaseScorer for FixedScorer {
    fn score(&self, _request: &VerificationRequest, _phase: Phase) -> u8 {
        self.0
    }

    fn name(&self) -> &'static str {
        "fixed"
    }
}
