//! Supporting documents
//!
//! Documents are evidence a reviewer consults. They never move a request
//! between phases.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Largest accepted upload (10 MiB)
pub const MAX_DOCUMENT_BYTES: u64 = 10 * 1024 * 1024;

/// Accepted file extensions
pub const ACCEPTED_EXTENSIONS: &[&str] = &["pdf", "jpg", "jpeg", "png"];

/// Declared document type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentType {
    /// Academic certificate
    AcademicCertificate,
    /// Transcript
    Transcript,
    /// Diploma
    Diploma,
    /// Degree
    Degree,
    /// Identity document of the student
    IdentityDocument,
    /// Anything else
    Other,
}

impl std::fmt::Display for DocumentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AcademicCertificate => write!(f, "academic_certificate"),
            Self::Transcript => write!(f, "transcript"),
            Self::Diploma => write!(f, "diploma"),
            Self::Degree => write!(f, "degree"),
            Self::IdentityDocument => write!(f, "identity_document"),
            Self::Other => write!(f, "other"),
        }
    }
}

impl std::str::FromStr for DocumentType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "academic_certificate" | "certificate" => Ok(Self::AcademicCertificate),
            "transcript" => Ok(Self::Transcript),
            "diploma" => Ok(Self::Diploma),
            "degree" => Ok(Self::Degree),
            "identity_document" | "identity" | "id" => Ok(Self::IdentityDocument),
            "other" => Ok(Self::Other),
            _ => Err(format!(
                "Invalid document type: {s}. Use: academic_certificate, transcript, diploma, degree, identity_document, other"
            )),
        }
    }
}

/// Reviewer-facing validation state of a document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationStatus {
    /// Document checked and valid
    Valid,
    /// Document checked and invalid
    Invalid,
    /// Needs a human look
    RequiresReview,
    /// Not yet checked
    #[default]
    Pending,
}

impl std::fmt::Display for ValidationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Valid => write!(f, "valid"),
            Self::Invalid => write!(f, "invalid"),
            Self::RequiresReview => write!(f, "requires_review"),
            Self::Pending => write!(f, "pending"),
        }
    }
}

/// A document attached to a request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    /// Document identifier
    pub id: String,
    /// Original file name (the file reference)
    pub file_name: String,
    /// Declared type
    pub document_type: DocumentType,
    /// Size in bytes
    pub size_bytes: u64,
    /// Validation state
    pub validation_status: ValidationStatus,
    /// When it was uploaded
    pub uploaded_at: DateTime<Utc>,
}

/// An upload before it is accepted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentUpload {
    /// File name including extension
    pub file_name: String,
    /// Declared type
    pub document_type: DocumentType,
    /// Size in bytes
    pub size_bytes: u64,
}

impl DocumentUpload {
    /// Check format and size constraints
    pub fn validate(&self) -> Result<(), String> {
        let name = self.file_name.trim();
        if name.is_empty() {
            return Err("Document file name cannot be empty".to_string());
        }

        let extension = name
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_lowercase())
            .unwrap_or_default();
        if !ACCEPTED_EXTENSIONS.contains(&extension.as_str()) {
            return Err(format!(
                "Unsupported document format '{name}'. Use: PDF, JPG, PNG"
            ));
        }

        if self.size_bytes == 0 {
            return Err("Document is empty".to_string());
        }
        if self.size_bytes > MAX_DOCUMENT_BYTES {
            return Err(format!(
                "Document is {} bytes, the limit is {MAX_DOCUMENT_BYTES} bytes (10MB)",
                self.size_bytes
            ));
        }

        Ok(())
    }
}
