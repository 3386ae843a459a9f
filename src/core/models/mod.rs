//! Domain models for docverify
//!
//! Pure data structures with no I/O dependencies.
//!
//! - [`VerificationRequest`] - A request moving through the verification phases
//! - [`Phase`] - One of the four fixed phases and its threshold
//! - [`Actor`] - The caller and their [`Role`]
//! - [`Document`] - Evidence attached to a request
//! - [`Institution`] - A tenant taking part in requests

mod actor;
mod document;
mod institution;
mod phase;
mod request;

pub use actor::{Actor, Role};
pub use document::{
    ACCEPTED_EXTENSIONS, Document, DocumentType, DocumentUpload, MAX_DOCUMENT_BYTES,
    ValidationStatus,
};
pub use institution::{Institution, InstitutionKind, is_valid_institution_id};
pub use phase::Phase;
pub use request::{
    META_NOTES, META_PURPOSE, META_REJECTION_REASON, NewRequest, OverallStatus, PhaseAttempt,
    PriorityLevel, VerificationRequest, VerificationType, format_request_number,
};
