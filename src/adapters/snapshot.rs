//! Store contents shared by the store adapters
//!
//! Both the in-memory and the JSON file store keep one `StoreSnapshot` and
//! apply the same insert/update rules to it.

use std::collections::BTreeMap;

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::core::models::{Institution, VerificationRequest};
use crate::core::{Result, WorkflowError};

/// Everything a store holds
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreSnapshot {
    /// Last allocated request-number sequence value
    #[serde(default)]
    pub sequence: u64,
    /// Institutions keyed by id
    #[serde(default)]
    pub institutions: BTreeMap<String, Institution>,
    /// Requests in submission order
    #[serde(default)]
    pub requests: Vec<VerificationRequest>,
}

impl StoreSnapshot {
    /// Insert a request with a fresh id and request number
    pub fn insert_request(&mut self, request: VerificationRequest) -> Result<VerificationRequest> {
        if self
            .requests
            .iter()
            .any(|r| r.id == request.id || r.request_number == request.request_number)
        {
            return Err(WorkflowError::AlreadyExists(format!(
                "request {} ({})",
                request.request_number, request.id
            )));
        }
        self.requests.push(request.clone());
        Ok(request)
    }

    /// Look up a request
    pub fn request(&self, id: &str) -> Result<VerificationRequest> {
        self.requests
            .iter()
            .find(|r| r.id == id)
            .cloned()
            .ok_or_else(|| WorkflowError::NotFound(format!("request {id}")))
    }

    /// Compare-and-swap update on `version`
    ///
    /// Terminal requests are immutable.
    pub fn update_request(&mut self, mut request: VerificationRequest) -> Result<VerificationRequest> {
        let stored = self
            .requests
            .iter_mut()
            .find(|r| r.id == request.id)
            .ok_or_else(|| WorkflowError::NotFound(format!("request {}", request.id)))?;

        if stored.version != request.version {
            return Err(WorkflowError::Conflict {
                request_id: request.id,
                expected: request.version,
                found: stored.version,
            });
        }
        if stored.is_terminal() {
            return Err(WorkflowError::RequestClosed {
                request_id: request.id,
                status: stored.overall_status,
            });
        }

        request.version += 1;
        request.updated_at = Utc::now();
        *stored = request.clone();
        Ok(request)
    }

    /// Allocate the next sequence value
    pub const fn next_sequence(&mut self) -> u64 {
        self.sequence += 1;
        self.sequence
    }

    /// Register an institution under a new id
    pub fn register(&mut self, institution: Institution) -> Result<Institution> {
        if self.institutions.contains_key(&institution.id) {
            return Err(WorkflowError::AlreadyExists(format!("institution {}", institution.id)));
        }
        self.institutions.insert(institution.id.clone(), institution.clone());
        Ok(institution)
    }

    /// Look up an institution
    pub fn institution(&self, id: &str) -> Result<Institution> {
        self.institutions
            .get(id)
            .cloned()
            .ok_or_else(|| WorkflowError::NotFound(format!("institution {id}")))
    }
}
