//! Verification request model
//!
//! A verification request asks a target institution to confirm a student's
//! credential. It moves through four phases and ends either completed or rejected.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::{Document, Phase, Role};

/// Metadata key for the stated purpose of a request
pub const META_PURPOSE: &str = "purpose";
/// Metadata key for free-form submitter notes
pub const META_NOTES: &str = "notes";
/// Metadata key recording why a request was rejected
pub const META_REJECTION_REASON: &str = "rejection_reason";

/// What is being verified
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerificationType {
    /// Academic certificate
    AcademicCertificate,
    /// Academic transcript
    Transcript,
    /// Diploma
    Diploma,
    /// Degree
    Degree,
}

impl std::fmt::Display for VerificationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AcademicCertificate => write!(f, "academic_certificate"),
            Self::Transcript => write!(f, "transcript"),
            Self::Diploma => write!(f, "diploma"),
            Self::Degree => write!(f, "degree"),
        }
    }
}

impl std::str::FromStr for VerificationType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "academic_certificate" | "certificate" => Ok(Self::AcademicCertificate),
            "transcript" => Ok(Self::Transcript),
            "diploma" => Ok(Self::Diploma),
            "degree" => Ok(Self::Degree),
            _ => Err(format!(
                "Invalid verification type: {s}. Use: academic_certificate, transcript, diploma, degree"
            )),
        }
    }
}

/// Overall request status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverallStatus {
    /// Submitted, no phase passed yet
    #[default]
    Submitted,
    /// Initial review passed, under regulator review
    Processing,
    /// Forwarded to or verified by the target institution
    InstitutionVerified,
    /// All phases passed
    Completed,
    /// Rejected by an administrator
    Rejected,
    /// Held for fraud review
    Flagged,
}

impl OverallStatus {
    /// All statuses, in lifecycle order
    pub const ALL: [Self; 6] = [
        Self::Submitted,
        Self::Processing,
        Self::InstitutionVerified,
        Self::Completed,
        Self::Rejected,
        Self::Flagged,
    ];

    /// Whether the request can no longer change
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Rejected)
    }
}

impl std::fmt::Display for OverallStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Submitted => write!(f, "submitted"),
            Self::Processing => write!(f, "processing"),
            Self::InstitutionVerified => write!(f, "institution_verified"),
            Self::Completed => write!(f, "completed"),
            Self::Rejected => write!(f, "rejected"),
            Self::Flagged => write!(f, "flagged"),
        }
    }
}

impl std::str::FromStr for OverallStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "submitted" => Ok(Self::Submitted),
            "processing" => Ok(Self::Processing),
            "institution_verified" => Ok(Self::InstitutionVerified),
            "completed" | "complete" => Ok(Self::Completed),
            "rejected" => Ok(Self::Rejected),
            "flagged" => Ok(Self::Flagged),
            _ => Err(format!(
                "Invalid status: {s}. Use: submitted, processing, institution_verified, completed, rejected, flagged"
            )),
        }
    }
}

/// Advisory priority; never affects transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PriorityLevel {
    /// Low
    Low,
    /// Normal (default)
    #[default]
    Normal,
    /// High
    High,
    /// Urgent
    Urgent,
}

impl std::fmt::Display for PriorityLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Low => write!(f, "low"),
            Self::Normal => write!(f, "normal"),
            Self::High => write!(f, "high"),
            Self::Urgent => write!(f, "urgent"),
        }
    }
}

impl std::str::FromStr for PriorityLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "normal" | "medium" => Ok(Self::Normal),
            "high" => Ok(Self::High),
            "urgent" | "critical" => Ok(Self::Urgent),
            _ => Err(format!("Invalid priority: {s}. Use: low, normal, high, urgent")),
        }
    }
}

/// A single processing attempt of one phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseAttempt {
    /// Phase that was attempted
    pub phase: Phase,
    /// Score the attempt produced (0-100)
    pub score: u8,
    /// Threshold the score was compared against
    pub threshold: u8,
    /// Whether the score met the threshold
    pub passed: bool,
    /// Role of the caller who triggered the attempt
    pub actor_role: Role,
    /// When the attempt was made
    pub attempted_at: DateTime<Utc>,
}

/// Validated creation payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRequest {
    /// Institution submitting the request (filled from the caller for institution staff)
    pub requesting_institution_id: Option<String>,
    /// Institution asked to verify the credential
    pub target_institution_id: String,
    /// Student full name
    pub student_name: String,
    /// Student identifier at the target institution
    pub student_id: String,
    /// Program of study
    pub program_name: String,
    /// Graduation date
    pub graduation_date: NaiveDate,
    /// What is being verified
    pub verification_type: VerificationType,
    /// Advisory priority
    pub priority_level: PriorityLevel,
    /// Stated purpose
    pub purpose: Option<String>,
    /// Free-form notes
    pub notes: Option<String>,
}

/// A verification request record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationRequest {
    /// Opaque unique identifier
    pub id: String,
    /// Human-readable unique number (e.g. `VR-20260101-000001`)
    pub request_number: String,
    /// Institution that submitted the request
    pub requesting_institution_id: String,
    /// Institution asked to verify
    pub target_institution_id: String,
    /// Student full name
    pub student_name: String,
    /// Student identifier
    pub student_id: String,
    /// Program of study
    pub program_name: String,
    /// Graduation date
    pub graduation_date: NaiveDate,
    /// What is being verified
    pub verification_type: VerificationType,
    /// Current phase; never decreases
    pub current_phase: Phase,
    /// Overall status
    pub overall_status: OverallStatus,
    /// Advisory priority
    pub priority_level: PriorityLevel,
    /// Score of the most recent attempt
    pub verification_score: u8,
    /// Fraud flags (append-only)
    #[serde(default)]
    pub fraud_flags: BTreeSet<String>,
    /// Open key/value metadata
    #[serde(default)]
    pub metadata: BTreeMap<String, String>,
    /// Submitted documents
    #[serde(default)]
    pub documents: Vec<Document>,
    /// Every processing attempt, oldest first
    #[serde(default)]
    pub attempts: Vec<PhaseAttempt>,
    /// Optimistic concurrency version, bumped on every write
    pub version: u64,
    /// When the request was submitted
    pub submitted_at: DateTime<Utc>,
    /// When the record was created
    pub created_at: DateTime<Utc>,
    /// When the record last changed
    pub updated_at: DateTime<Utc>,
    /// When the request completed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
}

impl VerificationRequest {
    /// Create a freshly submitted request in phase 1
    #[must_use]
    pub fn submit(
        id: String,
        request_number: String,
        requesting_institution_id: String,
        new: NewRequest,
        now: DateTime<Utc>,
    ) -> Self {
        let mut metadata = BTreeMap::new();
        if let Some(purpose) = new.purpose {
            metadata.insert(META_PURPOSE.to_string(), purpose);
        }
        if let Some(notes) = new.notes {
            metadata.insert(META_NOTES.to_string(), notes);
        }

        Self {
            id,
            request_number,
            requesting_institution_id,
            target_institution_id: new.target_institution_id,
            student_name: new.student_name,
            student_id: new.student_id,
            program_name: new.program_name,
            graduation_date: new.graduation_date,
            verification_type: new.verification_type,
            current_phase: Phase::INITIAL_REVIEW,
            overall_status: OverallStatus::Submitted,
            priority_level: new.priority_level,
            verification_score: 0,
            fraud_flags: BTreeSet::new(),
            metadata,
            documents: Vec::new(),
            attempts: Vec::new(),
            version: 1,
            submitted_at: now,
            created_at: now,
            updated_at: now,
            completed_at: None,
        }
    }

    /// Whether the request is completed or rejected
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        self.overall_status.is_terminal()
    }

    /// The most recent processing attempt
    #[must_use]
    pub fn last_attempt(&self) -> Option<&PhaseAttempt> {
        self.attempts.last()
    }

    /// Whether the request has been forwarded to the target institution
    #[must_use]
    pub fn is_forwarded(&self) -> bool {
        self.current_phase >= Phase::INSTITUTION_REVIEW
    }

    /// Whether the given institution participates in this request
    #[must_use]
    pub fn involves(&self, institution_id: &str) -> bool {
        self.requesting_institution_id == institution_id
            || self.target_institution_id == institution_id
    }
}

/// Format a human-readable request number
#[must_use]
pub fn format_request_number(submitted_at: DateTime<Utc>, sequence: u64) -> String {
    format!("VR-{}-{sequence:06}", submitted_at.format("%Y%m%d"))
}
