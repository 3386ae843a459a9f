//! Workflow orchestrator
//!
//! Owns the store and the scoring strategy and exposes every operation on a
//! verification request. Each operation runs read, check, write against the
//! store; the store's version check turns a concurrent writer into a
//! `Conflict` instead of a lost update.

use std::sync::Arc;

use chrono::Utc;

use super::phase_processor;
use super::policy::{self, Action, Capability};
use super::validation;
use crate::core::models::{
    Actor, Document, DocumentUpload, Institution, META_REJECTION_REASON, NewRequest,
    OverallStatus, PhaseAttempt, Role, ValidationStatus, VerificationRequest,
    format_request_number, is_valid_institution_id,
};
use crate::core::ports::{InstitutionDirectory, PhaseScorer, RequestFilter, RequestStore};
use crate::core::{Result, WorkflowError};

/// Result of a phase processing action
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessingOutcome {
    /// The request as stored after the attempt
    pub request: VerificationRequest,
    /// The attempt that was recorded
    pub attempt: PhaseAttempt,
}

impl ProcessingOutcome {
    /// Whether the attempt passed its threshold
    #[must_use]
    pub const fn passed(&self) -> bool {
        self.attempt.passed
    }
}

/// The verification workflow service
pub struct Workflow {
    requests: Arc<dyn RequestStore>,
    institutions: Arc<dyn InstitutionDirectory>,
    scorer: Box<dyn PhaseScorer>,
}

impl std::fmt::Debug for Workflow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Workflow")
            .field("scorer", &self.scorer.name())
            .finish_non_exhaustive()
    }
}

impl Workflow {
    /// Build a workflow over a store that also keeps institutions
    pub fn new<S>(store: Arc<S>, scorer: Box<dyn PhaseScorer>) -> Self
    where
        S: RequestStore + InstitutionDirectory + 'static,
    {
        Self {
            requests: store.clone(),
            institutions: store,
            scorer,
        }
    }

    /// Build a workflow from separate collaborators
    pub fn from_parts(
        requests: Arc<dyn RequestStore>,
        institutions: Arc<dyn InstitutionDirectory>,
        scorer: Box<dyn PhaseScorer>,
    ) -> Self {
        Self {
            requests,
            institutions,
            scorer,
        }
    }

    /// Name of the default scoring strategy
    #[must_use]
    pub fn scorer_name(&self) -> &'static str {
        self.scorer.name()
    }

    // =========================================================================
    // INSTITUTIONS
    // =========================================================================

    /// Register an institution (platform admins only)
    pub fn register_institution(
        &self,
        actor: &Actor,
        institution: Institution,
    ) -> Result<Institution> {
        policy::authorize_capability(actor, Capability::ManageInstitutions)?;

        if !is_valid_institution_id(&institution.id) {
            return Err(WorkflowError::validation(format!(
                "Invalid institution id '{}': use letters, digits, '-' or '_'",
                institution.id
            )));
        }
        if institution.name.trim().is_empty() {
            return Err(WorkflowError::validation("Missing required field: institution name"));
        }

        let registered = self.institutions.register(institution)?;
        log::info!("registered institution {} ({})", registered.id, registered.kind);
        Ok(registered)
    }

    /// All registered institutions
    pub fn institutions(&self) -> Result<Vec<Institution>> {
        self.institutions.institutions()
    }

    // =========================================================================
    // REQUESTS
    // =========================================================================

    /// Submit a new verification request
    ///
    /// Institution staff always submit for their own institution. Admins name
    /// the requesting institution in the payload.
    pub fn create_request(&self, actor: &Actor, mut new: NewRequest) -> Result<VerificationRequest> {
        policy::authorize_capability(actor, Capability::SubmitRequests)?;

        let now = Utc::now();
        validation::validate_new_request(&new, now.date_naive())?;

        let requesting = match (actor.role, actor.institution_id.as_deref()) {
            (Role::InstitutionUser, Some(own)) => {
                if new.requesting_institution_id.as_deref().is_some_and(|id| id != own) {
                    return Err(WorkflowError::UnauthorizedRole {
                        role: actor.role,
                        action: "submit on behalf of another institution".to_string(),
                    });
                }
                own.to_string()
            },
            (Role::InstitutionUser, None) => {
                return Err(WorkflowError::validation(
                    "Institution users must belong to an institution",
                ));
            },
            _ => new.requesting_institution_id.take().ok_or_else(|| {
                WorkflowError::validation("Missing required field: requesting institution")
            })?,
        };

        self.institutions.institution(&requesting)?;
        let target = self.institutions.institution(&new.target_institution_id)?;
        if !target.active {
            return Err(WorkflowError::validation(format!(
                "Institution {} is not accepting verification requests",
                target.id
            )));
        }

        let sequence = self.requests.next_sequence()?;
        let request = VerificationRequest::submit(
            uuid::Uuid::new_v4().to_string(),
            format_request_number(now, sequence),
            requesting,
            new,
            now,
        );

        let stored = self.requests.insert(request)?;
        log::info!(
            "submitted {} ({}) from {} to {}",
            stored.request_number,
            stored.verification_type,
            stored.requesting_institution_id,
            stored.target_institution_id
        );
        Ok(stored)
    }

    /// Fetch a request the caller is allowed to see
    pub fn get(&self, actor: &Actor, request_id: &str) -> Result<VerificationRequest> {
        let request = self.requests.get(request_id)?;
        policy::authorize(actor, &request, Action::View)?;
        Ok(request)
    }

    /// List requests visible to the caller
    ///
    /// Institution staff only ever see requests their institution takes part in.
    pub fn list(&self, actor: &Actor, mut filter: RequestFilter) -> Result<Vec<VerificationRequest>> {
        if !policy::has_capability(actor.role, Capability::ViewAllRequests) {
            match &actor.institution_id {
                Some(own) => filter.involving = Some(own.clone()),
                None => return Ok(Vec::new()),
            }
        }
        self.requests.list_filtered(&filter)
    }

    // =========================================================================
    // PHASE PROCESSING
    // =========================================================================

    /// Process `phase` of a request with the default scorer
    pub fn process_phase(
        &self,
        actor: &Actor,
        request_id: &str,
        phase: u8,
    ) -> Result<ProcessingOutcome> {
        self.process_phase_with(actor, request_id, phase, self.scorer.as_ref())
    }

    /// Process `phase` of a request with an explicit scorer
    ///
    /// Checks run in order: unknown id, terminal request, phase mismatch,
    /// authorization. Any failure leaves the stored request untouched.
    pub fn process_phase_with(
        &self,
        actor: &Actor,
        request_id: &str,
        phase: u8,
        scorer: &dyn PhaseScorer,
    ) -> Result<ProcessingOutcome> {
        let mut request = self.requests.get(request_id)?;

        let phase = phase_processor::check_phase(&request, phase).inspect_err(|e| {
            log::warn!("refused processing of {}: {e}", request.request_number);
        })?;
        policy::authorize(actor, &request, Action::Process(phase)).inspect_err(|e| {
            log::warn!("refused processing of {}: {e}", request.request_number);
        })?;

        let score = scorer.score(&request, phase);
        let attempt =
            phase_processor::record_attempt(&mut request, phase, score, actor.role, Utc::now());
        let stored = self.requests.update(request)?;

        if attempt.passed {
            log::info!(
                "{} passed phase {} with {} (threshold {}), now phase {} / {}",
                stored.request_number,
                attempt.phase,
                attempt.score,
                attempt.threshold,
                stored.current_phase,
                stored.overall_status
            );
        } else {
            log::info!(
                "{} failed phase {} with {} (threshold {})",
                stored.request_number,
                attempt.phase,
                attempt.score,
                attempt.threshold
            );
        }

        Ok(ProcessingOutcome {
            request: stored,
            attempt,
        })
    }

    // =========================================================================
    // MODERATION
    // =========================================================================

    /// Reject a request; it becomes terminal
    pub fn reject(&self, actor: &Actor, request_id: &str, reason: &str) -> Result<VerificationRequest> {
        let reason = reason.trim();
        if reason.is_empty() {
            return Err(WorkflowError::validation("Missing required field: rejection reason"));
        }

        let mut request = self.open_request(request_id)?;
        policy::authorize(actor, &request, Action::Reject)?;

        request.overall_status = OverallStatus::Rejected;
        request
            .metadata
            .insert(META_REJECTION_REASON.to_string(), reason.to_string());

        let stored = self.requests.update(request)?;
        log::info!("{} rejected by {}: {reason}", stored.request_number, actor.role);
        Ok(stored)
    }

    /// Add a fraud flag and hold the request as flagged
    ///
    /// Flags are never removed. A later passing attempt derives the status
    /// from the phase table again.
    pub fn flag(&self, actor: &Actor, request_id: &str, flag: &str) -> Result<VerificationRequest> {
        let flag = flag.trim();
        if flag.is_empty() {
            return Err(WorkflowError::validation("Missing required field: flag"));
        }

        let mut request = self.open_request(request_id)?;
        policy::authorize(actor, &request, Action::Flag)?;

        request.fraud_flags.insert(flag.to_string());
        request.overall_status = OverallStatus::Flagged;

        let stored = self.requests.update(request)?;
        log::warn!("{} flagged: {flag}", stored.request_number);
        Ok(stored)
    }

    // =========================================================================
    // DOCUMENTS
    // =========================================================================

    /// Attach a document to a request
    pub fn attach_document(
        &self,
        actor: &Actor,
        request_id: &str,
        upload: DocumentUpload,
    ) -> Result<(VerificationRequest, Document)> {
        upload.validate().map_err(WorkflowError::Validation)?;
        let DocumentUpload {
            file_name,
            document_type,
            size_bytes,
        } = upload;

        let mut request = self.open_request(request_id)?;
        policy::authorize(actor, &request, Action::AttachDocument)?;

        let document = Document {
            id: uuid::Uuid::new_v4().to_string(),
            file_name: file_name.trim().to_string(),
            document_type,
            size_bytes,
            validation_status: ValidationStatus::Pending,
            uploaded_at: Utc::now(),
        };
        request.documents.push(document.clone());

        let stored = self.requests.update(request)?;
        log::info!(
            "{} received document {} ({})",
            stored.request_number,
            document.file_name,
            document.document_type
        );
        Ok((stored, document))
    }

    /// Fetch a request that is not terminal
    fn open_request(&self, request_id: &str) -> Result<VerificationRequest> {
        let request = self.requests.get(request_id)?;
        if request.is_terminal() {
            return Err(WorkflowError::RequestClosed {
                request_id: request.id,
                status: request.overall_status,
            });
        }
        Ok(request)
    }
}
