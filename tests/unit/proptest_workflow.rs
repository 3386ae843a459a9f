//! Property-based tests for the verification state machine
//!
//! Uses proptest to drive random sequences of processing actions and check
//! the invariants that must hold after every step.

use docverify::adapters::FixedScorer;
use docverify::core::WorkflowError;
use docverify::core::models::{Actor, OverallStatus, Phase};
use docverify::core::ports::RequestStore;
use docverify::core::services::{passes, status_after_pass};
use proptest::prelude::*;

use crate::common::{TestEnv, regulator, target_staff};

/// The actor allowed to process `phase` of a fixture request
fn processor(phase: Phase) -> Actor {
    if phase.is_institution_phase() {
        target_staff()
    } else {
        regulator()
    }
}

proptest! {
    /// Phase never decreases and status always matches the phase table
    #[test]
    fn phase_is_monotone(scores in prop::collection::vec(0u8..=100, 1..40)) {
        let env = TestEnv::new();
        let id = env.submit().id;
        let mut last_phase = Phase::INITIAL_REVIEW;

        for score in scores {
            let current = env.store.get(&id).unwrap();
            if current.is_terminal() {
                break;
            }
            let phase = current.current_phase;
            let outcome = env
                .workflow
                .process_phase_with(&processor(phase), &id, phase.number(), &FixedScorer(score))
                .unwrap();

            prop_assert!(outcome.request.current_phase >= last_phase);
            prop_assert_eq!(outcome.passed(), passes(phase, score));
            if outcome.passed() {
                prop_assert_eq!(outcome.request.overall_status, status_after_pass(phase));
            } else {
                prop_assert_eq!(outcome.request.current_phase, phase);
                prop_assert_eq!(outcome.request.overall_status, current.overall_status);
            }
            last_phase = outcome.request.current_phase;
        }
    }

    /// Completed implies phase 4 and a final score of at least 85
    #[test]
    fn completion_requires_final_pass(scores in prop::collection::vec(60u8..=100, 4..30)) {
        let env = TestEnv::new();
        let id = env.submit().id;

        for score in scores {
            let current = env.store.get(&id).unwrap();
            if current.is_terminal() {
                break;
            }
            let phase = current.current_phase;
            env.workflow
                .process_phase_with(&processor(phase), &id, phase.number(), &FixedScorer(score))
                .unwrap();
        }

        let stored = env.store.get(&id).unwrap();
        if stored.overall_status == OverallStatus::Completed {
            prop_assert_eq!(stored.current_phase, Phase::FINAL_REVIEW);
            prop_assert!(stored.verification_score >= 85);
            prop_assert!(stored.completed_at.is_some());
            prop_assert!(stored.last_attempt().is_some_and(|a| a.passed && a.phase == Phase::FINAL_REVIEW));
        } else {
            prop_assert!(stored.completed_at.is_none());
        }
    }

    /// Any attempted phase other than the current one is refused without a
    /// write, whether the request is open, rejected or completed
    #[test]
    fn wrong_phase_never_writes(attempted in any::<u8>(), state in 0u8..3) {
        let env = TestEnv::new();
        let id = env.submit().id;
        match state {
            1 => {
                env.workflow.reject(&regulator(), &id, "duplicate").unwrap();
            },
            2 => {
                for phase in Phase::ALL {
                    env.workflow
                        .process_phase_with(&processor(phase), &id, phase.number(), &FixedScorer(100))
                        .unwrap();
                }
            },
            _ => {},
        }
        let before = env.store.get(&id).unwrap();
        prop_assume!(attempted != before.current_phase.number());

        let result = env.workflow.process_phase_with(&regulator(), &id, attempted, &FixedScorer(100));
        let is_invalid_phase = matches!(result, Err(WorkflowError::InvalidPhase { .. }));
        prop_assert!(is_invalid_phase);
        prop_assert_eq!(env.store.get(&id).unwrap(), before);
    }
}

#[cfg(test)]
mod deterministic_tests {
    use super::*;

    #[test]
    fn all_passing_scores_complete_in_four_steps() {
        let env = TestEnv::new();
        let id = env.submit().id;
        for phase in Phase::ALL {
            env.workflow
                .process_phase_with(&processor(phase), &id, phase.number(), &FixedScorer(phase.threshold()))
                .unwrap();
        }
        let stored = env.store.get(&id).unwrap();
        assert_eq!(stored.overall_status, OverallStatus::Completed);
        assert_eq!(stored.verification_score, 85);
    }
}
