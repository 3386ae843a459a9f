//! API request and response types
//!
//! All types are framework-agnostic and can be used by any client.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::error::{ApiError, ApiErrorData};
use crate::core::models::{
    Document, Institution, NewRequest, PhaseAttempt, PriorityLevel, VerificationRequest,
    VerificationType,
};

// =============================================================================
// RESPONSE ENVELOPE
// =============================================================================

/// Standard API response envelope
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    /// Whether the request succeeded
    pub success: bool,
    /// Response data (present on success)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// Error details (present on failure)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ApiErrorData>,
}

impl<T: Serialize> ApiResponse<T> {
    /// Create a successful response
    #[must_use]
    pub const fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }
}

impl ApiResponse<()> {
    /// Create an error response
    #[must_use]
    pub fn error(err: &ApiError) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(ApiErrorData::from(err)),
        }
    }
}

// =============================================================================
// REQUEST TYPES
// =============================================================================

/// Request body for submitting a verification request
#[derive(Debug, Clone, Deserialize)]
pub struct CreateVerificationRequest {
    /// Institution asked to verify
    #[serde(alias = "target_institution_id")]
    pub target_institution: String,
    /// Submitting institution (admins only; staff submit for their own)
    #[serde(default, alias = "requesting_institution_id")]
    pub requesting_institution: Option<String>,
    /// Student full name
    pub student_name: String,
    /// Student identifier
    pub student_id: String,
    /// Program of study
    pub program_name: String,
    /// Graduation date (YYYY-MM-DD)
    pub graduation_date: String,
    /// academic_certificate, transcript, diploma or degree
    pub verification_type: String,
    /// low, normal, high or urgent
    #[serde(default)]
    pub priority_level: Option<String>,
    /// Stated purpose
    #[serde(default)]
    pub purpose: Option<String>,
    /// Free-form notes
    #[serde(default)]
    pub notes: Option<String>,
}

impl CreateVerificationRequest {
    /// Parse the loosely typed body into a creation payload
    pub fn to_new_request(&self) -> Result<NewRequest, ApiError> {
        let graduation_date =
            chrono::NaiveDate::parse_from_str(self.graduation_date.trim(), "%Y-%m-%d").map_err(|_| {
                ApiError::bad_request(format!(
                    "Invalid graduation date '{}': use YYYY-MM-DD",
                    self.graduation_date
                ))
            })?;
        let verification_type = self
            .verification_type
            .parse::<VerificationType>()
            .map_err(ApiError::bad_request)?;
        let priority_level = self
            .priority_level
            .as_deref()
            .map(str::parse::<PriorityLevel>)
            .transpose()
            .map_err(ApiError::bad_request)?
            .unwrap_or_default();

        Ok(NewRequest {
            requesting_institution_id: non_empty(self.requesting_institution.as_deref()),
            target_institution_id: self.target_institution.trim().to_string(),
            student_name: self.student_name.trim().to_string(),
            student_id: self.student_id.trim().to_string(),
            program_name: self.program_name.trim().to_string(),
            graduation_date,
            verification_type,
            priority_level,
            purpose: non_empty(self.purpose.as_deref()),
            notes: non_empty(self.notes.as_deref()),
        })
    }
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value.map(str::trim).filter(|v| !v.is_empty()).map(String::from)
}

/// Request body for processing a phase
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct ProcessPhaseRequest {
    /// Phase to process (must be the current phase)
    pub phase: u8,
    /// Reviewer-assigned score; the configured scorer is used when absent
    #[serde(default)]
    pub score: Option<u8>,
}

/// Request body for rejecting a request
#[derive(Debug, Clone, Deserialize)]
pub struct RejectRequest {
    /// Why the request is rejected
    pub reason: String,
}

/// Request body for flagging a request
#[derive(Debug, Clone, Deserialize)]
pub struct FlagRequest {
    /// Flag identifier (e.g. "duplicate_submission")
    pub flag: String,
}

/// Request body for attaching a document
#[derive(Debug, Clone, Deserialize)]
pub struct AttachDocumentRequest {
    /// File name including extension
    pub file_name: String,
    /// Declared document type
    pub document_type: String,
    /// Size in bytes
    pub size_bytes: u64,
}

/// Request body for registering an institution
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterInstitutionRequest {
    /// Short identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// university, college, polytechnic, organization or regulator
    #[serde(default)]
    pub kind: Option<String>,
}

/// Filters for listing requests
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListRequestsQuery {
    /// Status filter
    #[serde(default)]
    pub status: Option<String>,
    /// Requesting institution filter
    #[serde(default)]
    pub requesting: Option<String>,
    /// Target institution filter
    #[serde(default)]
    pub target: Option<String>,
}

// =============================================================================
// RESPONSE DATA TYPES
// =============================================================================

/// Status endpoint response data
#[derive(Debug, Serialize)]
pub struct StatusData {
    /// Library version
    pub version: String,
    /// Default scoring strategy
    pub scorer: String,
    /// Number of institutions
    pub institutions: usize,
    /// Number of requests visible to the caller
    pub requests: usize,
    /// Request counts by status
    pub by_status: BTreeMap<String, usize>,
}

/// Single request in a list
#[derive(Debug, Serialize)]
pub struct RequestItem {
    /// Request ID
    pub id: String,
    /// Human-readable number
    pub request_number: String,
    /// Student name
    pub student_name: String,
    /// Verification type
    pub verification_type: String,
    /// Requesting institution
    pub requesting_institution_id: String,
    /// Target institution
    pub target_institution_id: String,
    /// Current phase (1-4)
    pub current_phase: u8,
    /// Overall status
    pub overall_status: String,
    /// Priority
    pub priority_level: String,
    /// Last score
    pub verification_score: u8,
    /// When submitted (RFC3339)
    pub submitted_at: String,
}

impl From<&VerificationRequest> for RequestItem {
    fn from(r: &VerificationRequest) -> Self {
        Self {
            id: r.id.clone(),
            request_number: r.request_number.clone(),
            student_name: r.student_name.clone(),
            verification_type: r.verification_type.to_string(),
            requesting_institution_id: r.requesting_institution_id.clone(),
            target_institution_id: r.target_institution_id.clone(),
            current_phase: r.current_phase.number(),
            overall_status: r.overall_status.to_string(),
            priority_level: r.priority_level.to_string(),
            verification_score: r.verification_score,
            submitted_at: r.submitted_at.to_rfc3339(),
        }
    }
}

/// Requests list response data
#[derive(Debug, Serialize)]
pub struct RequestsData {
    /// Matching requests, oldest first
    pub requests: Vec<RequestItem>,
}

/// A recorded phase attempt
#[derive(Debug, Serialize)]
pub struct AttemptItem {
    /// Phase attempted
    pub phase: u8,
    /// Score produced
    pub score: u8,
    /// Threshold applied
    pub threshold: u8,
    /// Whether it passed
    pub passed: bool,
    /// Role that triggered it
    pub actor_role: String,
    /// When (RFC3339)
    pub attempted_at: String,
}

impl From<&PhaseAttempt> for AttemptItem {
    fn from(a: &PhaseAttempt) -> Self {
        Self {
            phase: a.phase.number(),
            score: a.score,
            threshold: a.threshold,
            passed: a.passed,
            actor_role: a.actor_role.to_string(),
            attempted_at: a.attempted_at.to_rfc3339(),
        }
    }
}

/// An attached document
#[derive(Debug, Serialize)]
pub struct DocumentItem {
    /// Document ID
    pub id: String,
    /// File name
    pub file_name: String,
    /// Declared type
    pub document_type: String,
    /// Size in bytes
    pub size_bytes: u64,
    /// Validation status
    pub validation_status: String,
    /// When uploaded (RFC3339)
    pub uploaded_at: String,
}

impl From<&Document> for DocumentItem {
    fn from(d: &Document) -> Self {
        Self {
            id: d.id.clone(),
            file_name: d.file_name.clone(),
            document_type: d.document_type.to_string(),
            size_bytes: d.size_bytes,
            validation_status: d.validation_status.to_string(),
            uploaded_at: d.uploaded_at.to_rfc3339(),
        }
    }
}

/// Single request detail response
#[derive(Debug, Serialize)]
pub struct RequestDetailData {
    /// Summary fields
    #[serde(flatten)]
    pub summary: RequestItem,
    /// Student identifier
    pub student_id: String,
    /// Program of study
    pub program_name: String,
    /// Graduation date (YYYY-MM-DD)
    pub graduation_date: String,
    /// Fraud flags
    pub fraud_flags: Vec<String>,
    /// Metadata
    pub metadata: BTreeMap<String, String>,
    /// Documents
    pub documents: Vec<DocumentItem>,
    /// Processing history, oldest first
    pub attempts: Vec<AttemptItem>,
    /// Optimistic concurrency version
    pub version: u64,
    /// Last change (RFC3339)
    pub updated_at: String,
    /// Completion time (RFC3339)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<String>,
}

impl From<&VerificationRequest> for RequestDetailData {
    fn from(r: &VerificationRequest) -> Self {
        Self {
            summary: RequestItem::from(r),
            student_id: r.student_id.clone(),
            program_name: r.program_name.clone(),
            graduation_date: r.graduation_date.format("%Y-%m-%d").to_string(),
            fraud_flags: r.fraud_flags.iter().cloned().collect(),
            metadata: r.metadata.clone(),
            documents: r.documents.iter().map(DocumentItem::from).collect(),
            attempts: r.attempts.iter().map(AttemptItem::from).collect(),
            version: r.version,
            updated_at: r.updated_at.to_rfc3339(),
            completed_at: r.completed_at.map(|t| t.to_rfc3339()),
        }
    }
}

/// Phase processing response
#[derive(Debug, Serialize)]
pub struct ProcessData {
    /// The recorded attempt
    pub attempt: AttemptItem,
    /// The request after the attempt
    pub request: RequestDetailData,
}

/// Document attachment response
#[derive(Debug, Serialize)]
pub struct DocumentAttachData {
    /// Request the document was attached to
    pub request_id: String,
    /// The new document
    pub document: DocumentItem,
}

/// Single institution
#[derive(Debug, Serialize)]
pub struct InstitutionItem {
    /// Institution ID
    pub id: String,
    /// Name
    pub name: String,
    /// Kind
    pub kind: String,
    /// Whether it accepts requests
    pub active: bool,
    /// When registered (RFC3339)
    pub created_at: String,
}

impl From<&Institution> for InstitutionItem {
    fn from(i: &Institution) -> Self {
        Self {
            id: i.id.clone(),
            name: i.name.clone(),
            kind: i.kind.to_string(),
            active: i.active,
            created_at: i.created_at.to_rfc3339(),
        }
    }
}

/// Institutions list response
#[derive(Debug, Serialize)]
pub struct InstitutionsData {
    /// Institutions ordered by id
    pub institutions: Vec<InstitutionItem>,
}
