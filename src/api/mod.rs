//! HTTP-agnostic API layer
//!
//! This module provides typed request/response structures and pure handlers
//! that can be used by any HTTP server implementation (`tiny_http`, axum, etc.)
//! or directly by clients such as the CLI.
//!
//! ## Design
//!
//! - **Handlers are pure functions**: Take the workflow, the actor and typed input, return `Result<T, ApiError>`
//! - **Types are framework-agnostic**: No HTTP types leak into this module
//! - **Errors carry HTTP semantics**: `ApiError` knows its status code for translation

mod error;
mod handlers;
mod types;

pub use error::{ApiError, ApiErrorData, ErrorCode};
pub use handlers::{
    attach_document, create_request, flag_request, get_request, get_status, list_institutions,
    list_requests, process_phase, register_institution, reject_request,
};
pub use types::{
    ApiResponse, AttachDocumentRequest, AttemptItem, CreateVerificationRequest,
    DocumentAttachData, DocumentItem, FlagRequest, InstitutionItem, InstitutionsData,
    ListRequestsQuery, ProcessData, ProcessPhaseRequest, RegisterInstitutionRequest,
    RejectRequest, RequestDetailData, RequestItem, RequestsData, StatusData,
};
