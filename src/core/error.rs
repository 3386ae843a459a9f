//! Workflow error taxonomy
//!
//! Every error is reported synchronously to the caller and is recoverable by
//! retrying with corrected input. Nothing here is retried automatically.

use thiserror::Error;

use super::models::{OverallStatus, Phase, Role};

/// Result alias used throughout the core
pub type Result<T> = std::result::Result<T, WorkflowError>;

/// Errors raised by the verification workflow
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WorkflowError {
    /// The attempted phase does not match the request's current phase
    #[error("invalid phase: request {request_id} is in phase {current}, attempted phase {attempted}")]
    InvalidPhase {
        /// Request being processed
        request_id: String,
        /// Phase the request is currently in
        current: Phase,
        /// Phase the caller tried to process
        attempted: u8,
    },

    /// The caller's role may not perform the action
    #[error("unauthorized: role {role} may not {action}")]
    UnauthorizedRole {
        /// Role of the caller
        role: Role,
        /// Description of the denied action
        action: String,
    },

    /// No entity with the given id exists
    #[error("not found: {0}")]
    NotFound(String),

    /// A creation or upload payload is malformed
    #[error("validation failed: {0}")]
    Validation(String),

    /// The request is terminal and can no longer change
    #[error("request {request_id} is closed ({status})")]
    RequestClosed {
        /// Request that was addressed
        request_id: String,
        /// Terminal status it is in
        status: OverallStatus,
    },

    /// The stored request changed since the caller read it
    #[error("conflict: request {request_id} is at version {found}, update was based on {expected}")]
    Conflict {
        /// Request being updated
        request_id: String,
        /// Version the caller read
        expected: u64,
        /// Version currently stored
        found: u64,
    },

    /// An entity with the same identity already exists
    #[error("already exists: {0}")]
    AlreadyExists(String),

    /// The storage backend failed
    #[error("storage error: {0}")]
    Storage(String),
}

impl WorkflowError {
    /// Build a storage error from any displayable cause
    pub fn storage(cause: impl std::fmt::Display) -> Self {
        Self::Storage(cause.to_string())
    }

    /// Build a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }
}
