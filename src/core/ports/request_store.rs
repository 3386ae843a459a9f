//! Request store port
//!
//! Defines the interface for holding verification requests.

use crate::core::Result;
use crate::core::models::{OverallStatus, VerificationRequest};

/// Filter for listing requests
///
/// Every field that is set must match.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestFilter {
    /// Only requests submitted by this institution
    pub requesting_institution_id: Option<String>,
    /// Only requests targeting this institution
    pub target_institution_id: Option<String>,
    /// Only requests in this status
    pub status: Option<OverallStatus>,
    /// Only requests that involve this institution on either side
    pub involving: Option<String>,
}

impl RequestFilter {
    /// Whether a request satisfies the filter
    #[must_use]
    pub fn matches(&self, request: &VerificationRequest) -> bool {
        self.requesting_institution_id
            .as_deref()
            .is_none_or(|id| request.requesting_institution_id == id)
            && self
                .target_institution_id
                .as_deref()
                .is_none_or(|id| request.target_institution_id == id)
            && self.status.is_none_or(|s| request.overall_status == s)
            && self.involving.as_deref().is_none_or(|id| request.involves(id))
    }
}

/// Authoritative collection of verification requests
///
/// Implementations are the single source of truth; callers never keep copies
/// past a single action.
pub trait RequestStore: Send + Sync {
    /// Insert a new request
    ///
    /// Fails with `AlreadyExists` if the id or request number is taken.
    fn insert(&self, request: VerificationRequest) -> Result<VerificationRequest>;

    /// Fetch a request by id
    ///
    /// Fails with `NotFound` for unknown ids.
    fn get(&self, id: &str) -> Result<VerificationRequest>;

    /// Replace a request in place
    ///
    /// `request.version` must equal the stored version, otherwise the update
    /// fails with `Conflict` and nothing is written. On success the stored
    /// copy gets the next version and a fresh `updated_at`, and is returned.
    fn update(&self, request: VerificationRequest) -> Result<VerificationRequest>;

    /// List all requests, oldest first
    fn list(&self) -> Result<Vec<VerificationRequest>>;

    /// Allocate the next request-number sequence value
    fn next_sequence(&self) -> Result<u64>;

    /// List requests matching a filter
    fn list_filtered(&self, filter: &RequestFilter) -> Result<Vec<VerificationRequest>> {
        Ok(self.list()?.into_iter().filter(|r| filter.matches(r)).collect())
    }
}
