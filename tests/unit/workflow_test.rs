//! Tests for the workflow orchestrator
//!
//! Covers the phase walk, role gating, moderation, documents and tenant
//! visibility against a seeded memory store.

use chrono::{Duration, Utc};
use docverify::adapters::FixedScorer;
use docverify::core::WorkflowError;
use docverify::core::models::{
    DocumentType, DocumentUpload, Institution, InstitutionKind, META_REJECTION_REASON,
    OverallStatus, Phase, ValidationStatus,
};
use docverify::core::ports::{RequestFilter, RequestStore};

use crate::common::{
    INACTIVE, OTHER, REQUESTING, TARGET, TestEnv, admin_request, new_request, other_staff,
    platform, regulator, requesting_staff, target_staff,
};

/// Walk a request from submission to phase 4 with passing scores
fn forward_to_final(env: &TestEnv) -> String {
    let id = env.submit().id;
    let pass = FixedScorer(100);
    env.workflow.process_phase_with(&regulator(), &id, 1, &pass).unwrap();
    env.workflow.process_phase_with(&regulator(), &id, 2, &pass).unwrap();
    env.workflow.process_phase_with(&target_staff(), &id, 3, &pass).unwrap();
    id
}

// =============================================================================
// PHASE WALK
// =============================================================================

#[test]
fn transcript_request_walks_all_phases() {
    let env = TestEnv::with_scores(&[90, 60, 80, 85, 90]);
    let created = env.submit();
    assert_eq!(created.current_phase, Phase::INITIAL_REVIEW);
    assert_eq!(created.overall_status, OverallStatus::Submitted);
    assert_eq!(created.verification_score, 0);

    let id = created.id;

    let first = env.workflow.process_phase(&regulator(), &id, 1).unwrap();
    assert!(first.passed());
    assert_eq!(first.request.current_phase.number(), 2);
    assert_eq!(first.request.overall_status, OverallStatus::Processing);

    let failed = env.workflow.process_phase(&regulator(), &id, 2).unwrap();
    assert!(!failed.passed());
    assert_eq!(failed.attempt.score, 60);
    assert_eq!(failed.attempt.threshold, 75);
    assert_eq!(failed.request.current_phase.number(), 2);
    assert_eq!(failed.request.overall_status, OverallStatus::Processing);

    let second = env.workflow.process_phase(&regulator(), &id, 2).unwrap();
    assert!(second.passed());
    assert_eq!(second.request.current_phase.number(), 3);
    assert_eq!(second.request.overall_status, OverallStatus::InstitutionVerified);

    let third = env.workflow.process_phase(&target_staff(), &id, 3).unwrap();
    assert!(third.passed());
    assert_eq!(third.request.current_phase.number(), 4);
    assert_eq!(third.request.overall_status, OverallStatus::InstitutionVerified);

    let last = env.workflow.process_phase(&platform(), &id, 4).unwrap();
    assert!(last.passed());
    assert_eq!(last.request.current_phase.number(), 4);
    assert_eq!(last.request.overall_status, OverallStatus::Completed);
    assert_eq!(last.request.verification_score, 90);
    assert!(last.request.completed_at.is_some());

    let stored = env.store.get(&id).unwrap();
    assert_eq!(stored.attempts.len(), 5);
    assert_eq!(stored, last.request);
}

#[test]
fn thresholds_are_inclusive() {
    let env = TestEnv::new();
    let id = env.submit().id;

    let below = env
        .workflow
        .process_phase_with(&regulator(), &id, 1, &FixedScorer(69))
        .unwrap();
    assert!(!below.passed());

    let at = env
        .workflow
        .process_phase_with(&regulator(), &id, 1, &FixedScorer(70))
        .unwrap();
    assert!(at.passed());
}

#[test]
fn repeated_failures_never_advance() {
    let env = TestEnv::new();
    let id = env.submit().id;

    for _ in 0..5 {
        let outcome = env.workflow.process_phase(&regulator(), &id, 1).unwrap();
        assert!(!outcome.passed());
    }

    let stored = env.store.get(&id).unwrap();
    assert_eq!(stored.current_phase, Phase::INITIAL_REVIEW);
    assert_eq!(stored.overall_status, OverallStatus::Submitted);
    assert_eq!(stored.attempts.len(), 5);
    assert!(stored.attempts.iter().all(|a| !a.passed));
}

#[test]
fn scores_above_100_are_clamped() {
    let env = TestEnv::new();
    let id = env.submit().id;

    let outcome = env
        .workflow
        .process_phase_with(&regulator(), &id, 1, &FixedScorer(250))
        .unwrap();
    assert_eq!(outcome.attempt.score, 100);
    assert_eq!(outcome.request.verification_score, 100);
}

#[test]
fn every_write_bumps_the_version() {
    let env = TestEnv::new();
    let created = env.submit();
    assert_eq!(created.version, 1);

    let outcome = env.workflow.process_phase(&regulator(), &created.id, 1).unwrap();
    assert_eq!(outcome.request.version, 2);
    assert!(outcome.request.updated_at >= created.updated_at);
}

// =============================================================================
// PHASE ERRORS
// =============================================================================

#[test]
fn mismatched_phase_is_invalid_and_leaves_request_unchanged() {
    let env = TestEnv::with_scores(&[100]);
    let id = env.submit().id;
    let before = env.store.get(&id).unwrap();

    for attempted in [0, 2, 3, 4, 5, 200] {
        let err = env.workflow.process_phase(&regulator(), &id, attempted).unwrap_err();
        assert!(
            matches!(err, WorkflowError::InvalidPhase { attempted: a, .. } if a == attempted),
            "phase {attempted}: {err}"
        );
    }

    assert_eq!(env.store.get(&id).unwrap(), before);
}

#[test]
fn unknown_request_is_not_found() {
    let env = TestEnv::new();
    let err = env.workflow.process_phase(&regulator(), "missing", 1).unwrap_err();
    assert!(matches!(err, WorkflowError::NotFound(_)));
}

#[test]
fn institution_phase_by_other_institution_is_unauthorized() {
    let env = TestEnv::new();
    let pass = FixedScorer(100);
    let id = env.submit().id;
    env.workflow.process_phase_with(&regulator(), &id, 1, &pass).unwrap();
    env.workflow.process_phase_with(&regulator(), &id, 2, &pass).unwrap();
    let before = env.store.get(&id).unwrap();

    for actor in [other_staff(), requesting_staff(), regulator(), platform()] {
        let err = env
            .workflow
            .process_phase_with(&actor, &id, 3, &pass)
            .unwrap_err();
        assert!(
            matches!(err, WorkflowError::UnauthorizedRole { .. }),
            "{actor:?}: {err}"
        );
    }

    assert_eq!(env.store.get(&id).unwrap(), before);
}

#[test]
fn regulator_phases_reject_institution_staff() {
    let env = TestEnv::new();
    let id = env.submit().id;

    let err = env
        .workflow
        .process_phase_with(&target_staff(), &id, 1, &FixedScorer(100))
        .unwrap_err();
    assert!(matches!(err, WorkflowError::UnauthorizedRole { .. }));

    let final_id = forward_to_final(&env);
    let err = env
        .workflow
        .process_phase_with(&target_staff(), &final_id, 4, &FixedScorer(100))
        .unwrap_err();
    assert!(matches!(err, WorkflowError::UnauthorizedRole { .. }));
}

#[test]
fn completed_request_is_closed() {
    let env = TestEnv::new();
    let id = forward_to_final(&env);
    env.workflow
        .process_phase_with(&regulator(), &id, 4, &FixedScorer(85))
        .unwrap();

    let err = env
        .workflow
        .process_phase_with(&regulator(), &id, 4, &FixedScorer(100))
        .unwrap_err();
    assert!(matches!(
        err,
        WorkflowError::RequestClosed {
            status: OverallStatus::Completed,
            ..
        }
    ));

    let err = env.workflow.reject(&regulator(), &id, "too late").unwrap_err();
    assert!(matches!(err, WorkflowError::RequestClosed { .. }));

    // Any other phase is still a phase mismatch
    let err = env
        .workflow
        .process_phase_with(&regulator(), &id, 2, &FixedScorer(100))
        .unwrap_err();
    assert!(matches!(err, WorkflowError::InvalidPhase { attempted: 2, .. }));
}

// =============================================================================
// MODERATION
// =============================================================================

#[test]
fn reject_is_terminal_and_records_reason() {
    let env = TestEnv::new();
    let id = env.submit().id;

    let rejected = env
        .workflow
        .reject(&regulator(), &id, "Transcript appears altered")
        .unwrap();
    assert_eq!(rejected.overall_status, OverallStatus::Rejected);
    assert_eq!(
        rejected.metadata.get(META_REJECTION_REASON).map(String::as_str),
        Some("Transcript appears altered")
    );

    let err = env.workflow.process_phase(&regulator(), &id, 1).unwrap_err();
    assert!(matches!(
        err,
        WorkflowError::RequestClosed {
            status: OverallStatus::Rejected,
            ..
        }
    ));

    let err = env.workflow.process_phase(&regulator(), &id, 3).unwrap_err();
    assert!(matches!(err, WorkflowError::InvalidPhase { attempted: 3, .. }));
    assert_eq!(env.store.get(&id).unwrap(), rejected);
}

#[test]
fn reject_needs_admin_and_a_reason() {
    let env = TestEnv::new();
    let id = env.submit().id;

    let err = env.workflow.reject(&target_staff(), &id, "no").unwrap_err();
    assert!(matches!(err, WorkflowError::UnauthorizedRole { .. }));

    let err = env.workflow.reject(&regulator(), &id, "   ").unwrap_err();
    assert!(matches!(err, WorkflowError::Validation(_)));

    assert_eq!(
        env.store.get(&id).unwrap().overall_status,
        OverallStatus::Submitted
    );
}

#[test]
fn flags_are_deduplicated_and_hold_the_request() {
    let env = TestEnv::new();
    let id = env.submit().id;

    env.workflow.flag(&regulator(), &id, "duplicate_submission").unwrap();
    let flagged = env.workflow.flag(&platform(), &id, "duplicate_submission").unwrap();
    assert_eq!(flagged.overall_status, OverallStatus::Flagged);
    assert_eq!(flagged.fraud_flags.len(), 1);

    let err = env.workflow.flag(&target_staff(), &id, "other").unwrap_err();
    assert!(matches!(err, WorkflowError::UnauthorizedRole { .. }));
}

#[test]
fn passing_after_flag_rederives_status() {
    let env = TestEnv::new();
    let id = env.submit().id;
    env.workflow.flag(&regulator(), &id, "name_mismatch").unwrap();

    let outcome = env
        .workflow
        .process_phase_with(&regulator(), &id, 1, &FixedScorer(95))
        .unwrap();
    assert_eq!(outcome.request.overall_status, OverallStatus::Processing);
    assert!(outcome.request.fraud_flags.contains("name_mismatch"));
}

// =============================================================================
// DOCUMENTS
// =============================================================================

fn upload(file_name: &str, size_bytes: u64) -> DocumentUpload {
    DocumentUpload {
        file_name: file_name.to_string(),
        document_type: DocumentType::Transcript,
        size_bytes,
    }
}

#[test]
fn attached_documents_start_pending() {
    let env = TestEnv::new();
    let id = env.submit().id;

    let (request, document) = env
        .workflow
        .attach_document(&requesting_staff(), &id, upload("transcript.pdf", 2048))
        .unwrap();
    assert_eq!(document.validation_status, ValidationStatus::Pending);
    assert_eq!(request.documents, vec![document]);
    assert_eq!(request.current_phase, Phase::INITIAL_REVIEW);
}

#[test]
fn documents_are_checked_for_format_and_size() {
    let env = TestEnv::new();
    let id = env.submit().id;

    for bad in [upload("transcript.docx", 10), upload("scan.png", 0), upload("scan.jpg", 11 * 1024 * 1024)] {
        let err = env.workflow.attach_document(&regulator(), &id, bad).unwrap_err();
        assert!(matches!(err, WorkflowError::Validation(_)), "{err}");
    }
    assert!(env.store.get(&id).unwrap().documents.is_empty());
}

#[test]
fn uninvolved_institution_cannot_attach() {
    let env = TestEnv::new();
    let id = env.submit().id;

    let err = env
        .workflow
        .attach_document(&other_staff(), &id, upload("x.pdf", 10))
        .unwrap_err();
    assert!(matches!(err, WorkflowError::UnauthorizedRole { .. }));
}

// =============================================================================
// SUBMISSION
// =============================================================================

#[test]
fn institution_staff_submit_for_their_own_institution() {
    let env = TestEnv::new();
    let created = env
        .workflow
        .create_request(&requesting_staff(), new_request(TARGET))
        .unwrap();
    assert_eq!(created.requesting_institution_id, REQUESTING);
    assert_eq!(created.target_institution_id, TARGET);
    assert!(created.request_number.starts_with("VR-"));
    assert!(created.request_number.ends_with("-000001"));

    let mut on_behalf = new_request(TARGET);
    on_behalf.requesting_institution_id = Some(OTHER.to_string());
    let err = env
        .workflow
        .create_request(&requesting_staff(), on_behalf)
        .unwrap_err();
    assert!(matches!(err, WorkflowError::UnauthorizedRole { .. }));
}

#[test]
fn request_numbers_are_unique() {
    let env = TestEnv::new();
    let a = env.submit();
    let b = env.submit();
    assert_ne!(a.id, b.id);
    assert_ne!(a.request_number, b.request_number);
}

#[test]
fn admins_must_name_the_requesting_institution() {
    let env = TestEnv::new();
    let err = env
        .workflow
        .create_request(&regulator(), new_request(TARGET))
        .unwrap_err();
    assert!(matches!(err, WorkflowError::Validation(_)));
}

#[test]
fn target_must_exist_and_be_active() {
    let env = TestEnv::new();

    let err = env
        .workflow
        .create_request(&requesting_staff(), new_request("nowhere"))
        .unwrap_err();
    assert!(matches!(err, WorkflowError::NotFound(_)));

    let err = env
        .workflow
        .create_request(&requesting_staff(), new_request(INACTIVE))
        .unwrap_err();
    assert!(matches!(err, WorkflowError::Validation(_)));
}

#[test]
fn invalid_payloads_are_rejected() {
    let env = TestEnv::new();

    let mut blank = admin_request();
    blank.student_name = "  ".to_string();
    assert!(matches!(
        env.workflow.create_request(&regulator(), blank),
        Err(WorkflowError::Validation(_))
    ));

    let mut future = admin_request();
    future.graduation_date = (Utc::now() + Duration::days(30)).date_naive();
    assert!(matches!(
        env.workflow.create_request(&regulator(), future),
        Err(WorkflowError::Validation(_))
    ));

    assert!(env.workflow.list(&regulator(), RequestFilter::default()).unwrap().is_empty());
}

// =============================================================================
// VISIBILITY
// =============================================================================

#[test]
fn institution_staff_only_see_their_requests() {
    let env = TestEnv::new();
    let id = env.submit().id;

    assert!(env.workflow.get(&target_staff(), &id).is_ok());
    assert!(env.workflow.get(&requesting_staff(), &id).is_ok());
    assert!(matches!(
        env.workflow.get(&other_staff(), &id),
        Err(WorkflowError::UnauthorizedRole { .. })
    ));

    assert_eq!(
        env.workflow.list(&target_staff(), RequestFilter::default()).unwrap().len(),
        1
    );
    assert!(env.workflow.list(&other_staff(), RequestFilter::default()).unwrap().is_empty());
    assert_eq!(
        env.workflow.list(&regulator(), RequestFilter::default()).unwrap().len(),
        1
    );
}

#[test]
fn list_filters_by_status() {
    let env = TestEnv::new();
    let first = env.submit().id;
    env.submit();
    env.workflow
        .process_phase_with(&regulator(), &first, 1, &FixedScorer(100))
        .unwrap();

    let filter = RequestFilter {
        status: Some(OverallStatus::Processing),
        ..RequestFilter::default()
    };
    let processing = env.workflow.list(&regulator(), filter).unwrap();
    assert_eq!(processing.len(), 1);
    assert_eq!(processing[0].id, first);
}

// =============================================================================
// INSTITUTIONS
// =============================================================================

#[test]
fn only_platform_admins_register_institutions() {
    let env = TestEnv::new();
    let new = || {
        Institution::new(
            "uni-cape-coast".to_string(),
            "University of Cape Coast".to_string(),
            InstitutionKind::University,
        )
    };

    let err = env.workflow.register_institution(&regulator(), new()).unwrap_err();
    assert!(matches!(err, WorkflowError::UnauthorizedRole { .. }));

    env.workflow.register_institution(&platform(), new()).unwrap();
    let err = env.workflow.register_institution(&platform(), new()).unwrap_err();
    assert!(matches!(err, WorkflowError::AlreadyExists(_)));

    let bad = Institution::new("has space".to_string(), "x".to_string(), InstitutionKind::College);
    let err = env.workflow.register_institution(&platform(), bad).unwrap_err();
    assert!(matches!(err, WorkflowError::Validation(_)));

    assert_eq!(env.workflow.institutions().unwrap().len(), 5);
}
