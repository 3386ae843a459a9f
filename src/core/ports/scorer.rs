//! Phase scoring port
//!
//! The score of a phase attempt comes from an injected strategy. Real
//! document authenticity checks plug in here.

use crate::core::models::{Phase, VerificationRequest};

/// Produces a score for a phase attempt
pub trait PhaseScorer: Send + Sync {
    /// Score an attempt of `phase` on `request`
    ///
    /// Values above 100 are clamped by the caller.
    fn score(&self, request: &VerificationRequest, phase: Phase) -> u8;

    /// Short name for logs
    fn name(&self) -> &'static str;
}
