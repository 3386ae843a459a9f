//! Pure API handlers
//!
//! These handlers contain business logic and are HTTP-agnostic.
//! They take the workflow, the calling actor and typed input, and return
//! `Result<T, ApiError>`.

use std::collections::BTreeMap;

use crate::adapters::FixedScorer;
use crate::core::models::{
    Actor, DocumentType, DocumentUpload, Institution, InstitutionKind, OverallStatus,
};
use crate::core::ports::RequestFilter;
use crate::core::services::{Workflow, check_score};

use super::error::ApiError;
use super::types::{
    AttachDocumentRequest, AttemptItem, CreateVerificationRequest, DocumentAttachData,
    DocumentItem, FlagRequest, InstitutionItem, InstitutionsData, ListRequestsQuery, ProcessData,
    ProcessPhaseRequest, RegisterInstitutionRequest, RejectRequest, RequestDetailData,
    RequestItem, RequestsData, StatusData,
};

// =============================================================================
// STATUS
// =============================================================================

/// Get overall status as seen by the caller
pub fn get_status(workflow: &Workflow, actor: &Actor) -> Result<StatusData, ApiError> {
    let requests = workflow.list(actor, RequestFilter::default())?;
    let institutions = workflow.institutions()?;

    let mut by_status: BTreeMap<String, usize> = OverallStatus::ALL
        .iter()
        .map(|s| (s.to_string(), 0))
        .collect();
    for request in &requests {
        *by_status.entry(request.overall_status.to_string()).or_default() += 1;
    }

    Ok(StatusData {
        version: crate::VERSION.to_string(),
        scorer: workflow.scorer_name().to_string(),
        institutions: institutions.len(),
        requests: requests.len(),
        by_status,
    })
}

// =============================================================================
// INSTITUTIONS
// =============================================================================

/// List all institutions
pub fn list_institutions(workflow: &Workflow) -> Result<InstitutionsData, ApiError> {
    let institutions = workflow.institutions()?;
    Ok(InstitutionsData {
        institutions: institutions.iter().map(InstitutionItem::from).collect(),
    })
}

/// Register an institution
pub fn register_institution(
    workflow: &Workflow,
    actor: &Actor,
    req: &RegisterInstitutionRequest,
) -> Result<InstitutionItem, ApiError> {
    let kind = req
        .kind
        .as_deref()
        .map(str::parse::<InstitutionKind>)
        .transpose()
        .map_err(ApiError::bad_request)?
        .unwrap_or_default();

    let institution = Institution::new(req.id.trim().to_string(), req.name.trim().to_string(), kind);
    let registered = workflow.register_institution(actor, institution)?;
    Ok(InstitutionItem::from(&registered))
}

// =============================================================================
// REQUESTS
// =============================================================================

/// List requests visible to the caller
pub fn list_requests(
    workflow: &Workflow,
    actor: &Actor,
    query: &ListRequestsQuery,
) -> Result<RequestsData, ApiError> {
    let status = query
        .status
        .as_deref()
        .filter(|s| !s.is_empty())
        .map(str::parse::<OverallStatus>)
        .transpose()
        .map_err(ApiError::bad_request)?;

    let filter = RequestFilter {
        requesting_institution_id: query.requesting.clone().filter(|s| !s.is_empty()),
        target_institution_id: query.target.clone().filter(|s| !s.is_empty()),
        status,
        involving: None,
    };

    let requests = workflow.list(actor, filter)?;
    Ok(RequestsData {
        requests: requests.iter().map(RequestItem::from).collect(),
    })
}

/// Submit a verification request
pub fn create_request(
    workflow: &Workflow,
    actor: &Actor,
    req: &CreateVerificationRequest,
) -> Result<RequestDetailData, ApiError> {
    let new = req.to_new_request()?;
    let request = workflow.create_request(actor, new)?;
    Ok(RequestDetailData::from(&request))
}

/// Get a single request by ID
pub fn get_request(
    workflow: &Workflow,
    actor: &Actor,
    id: &str,
) -> Result<RequestDetailData, ApiError> {
    let request = workflow.get(actor, id)?;
    Ok(RequestDetailData::from(&request))
}

// =============================================================================
// PROCESSING AND MODERATION
// =============================================================================

/// Process the current phase of a request
///
/// A supplied score replaces the configured scorer for this attempt only. It
/// must be in `0..=100`.
pub fn process_phase(
    workflow: &Workflow,
    actor: &Actor,
    id: &str,
    req: &ProcessPhaseRequest,
) -> Result<ProcessData, ApiError> {
    let outcome = match req.score {
        Some(score) => {
            let score = check_score(id, score)?;
            workflow.process_phase_with(actor, id, req.phase, &FixedScorer(score))?
        },
        None => workflow.process_phase(actor, id, req.phase)?,
    };

    Ok(ProcessData {
        attempt: AttemptItem::from(&outcome.attempt),
        request: RequestDetailData::from(&outcome.request),
    })
}

/// Reject a request
pub fn reject_request(
    workflow: &Workflow,
    actor: &Actor,
    id: &str,
    req: &RejectRequest,
) -> Result<RequestDetailData, ApiError> {
    let request = workflow.reject(actor, id, &req.reason)?;
    Ok(RequestDetailData::from(&request))
}

/// Add a fraud flag to a request
pub fn flag_request(
    workflow: &Workflow,
    actor: &Actor,
    id: &str,
    req: &FlagRequest,
) -> Result<RequestDetailData, ApiError> {
    let request = workflow.flag(actor, id, &req.flag)?;
    Ok(RequestDetailData::from(&request))
}

// =============================================================================
// DOCUMENTS
// =============================================================================

/// Attach a document to a request
pub fn attach_document(
    workflow: &Workflow,
    actor: &Actor,
    id: &str,
    req: &AttachDocumentRequest,
) -> Result<DocumentAttachData, ApiError> {
    let upload = DocumentUpload {
        file_name: req.file_name.clone(),
        document_type: req
            .document_type
            .parse::<DocumentType>()
            .map_err(ApiError::bad_request)?,
        size_bytes: req.size_bytes,
    };

    let (request, document) = workflow.attach_document(actor, id, upload)?;
    Ok(DocumentAttachData {
        request_id: request.id,
        document: DocumentItem::from(&document),
    })
}
