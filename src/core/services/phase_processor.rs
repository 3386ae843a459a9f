//! Phase processor - judges an attempt against its threshold and applies the transition
//!
//! This is pure state-machine logic: it mutates the request it is given and
//! never touches a store. The caller persists the result.

use chrono::{DateTime, Utc};

use crate::core::models::{OverallStatus, Phase, PhaseAttempt, Role, VerificationRequest};
use crate::core::{Result, WorkflowError};

/// Highest possible score
pub const MAX_SCORE: u8 = 100;

/// Whether `score` passes `phase`
#[must_use]
pub const fn passes(phase: Phase, score: u8) -> bool {
    score >= phase.threshold()
}

/// Status of a request that has just passed `passed`
///
/// Passing phase 3 hands the request to final review without changing the
/// status reached when it was forwarded.
#[must_use]
pub const fn status_after_pass(passed: Phase) -> OverallStatus {
    match passed.number() {
        1 => OverallStatus::Processing,
        2 | 3 => OverallStatus::InstitutionVerified,
        _ => OverallStatus::Completed,
    }
}

/// Ensure `attempted` is the request's current phase
///
/// A mismatched phase is always `InvalidPhase`, terminal or not. A terminal
/// request refuses its own current phase with `RequestClosed`.
pub fn check_phase(request: &VerificationRequest, attempted: u8) -> Result<Phase> {
    let phase = match Phase::new(attempted) {
        Some(phase) if phase == request.current_phase => phase,
        _ => {
            return Err(WorkflowError::InvalidPhase {
                request_id: request.id.clone(),
                current: request.current_phase,
                attempted,
            });
        },
    };

    if request.is_terminal() {
        return Err(WorkflowError::RequestClosed {
            request_id: request.id.clone(),
            status: request.overall_status,
        });
    }
    Ok(phase)
}

/// Check an explicitly supplied score
///
/// Scores given by a reviewer must already be in `0..=100`; only scorer
/// adapters are clamped.
pub fn check_score(request_id: &str, score: u8) -> Result<u8> {
    if score > MAX_SCORE {
        return Err(WorkflowError::validation(format!(
            "Score {score} for request {request_id} is out of range 0-{MAX_SCORE}"
        )));
    }
    Ok(score)
}

/// Record an attempt with a known score and apply its transition
///
/// On a pass the phase advances (saturating at 4) and the status is derived
/// from the phase just passed. On a failure only the score and the attempt
/// log change.
pub fn record_attempt(
    request: &mut VerificationRequest,
    phase: Phase,
    score: u8,
    actor_role: Role,
    now: DateTime<Utc>,
) -> PhaseAttempt {
    let score = score.min(MAX_SCORE);
    let passed = passes(phase, score);

    let attempt = PhaseAttempt {
        phase,
        score,
        threshold: phase.threshold(),
        passed,
        actor_role,
        attempted_at: now,
    };

    request.verification_score = score;
    request.attempts.push(attempt);

    if passed {
        request.current_phase = phase.next();
        request.overall_status = status_after_pass(phase);
        if request.overall_status == OverallStatus::Completed {
            request.completed_at = Some(now);
        }
    }

    attempt
}
