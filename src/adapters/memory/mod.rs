//! In-memory store
//!
//! Implements `RequestStore` and `InstitutionDirectory` over a lock-guarded
//! snapshot. Nothing survives the process.

use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::adapters::StoreSnapshot;
use crate::core::models::{Institution, VerificationRequest};
use crate::core::ports::{InstitutionDirectory, RequestStore};
use crate::core::{Result, WorkflowError};

/// Store held entirely in memory
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: RwLock<StoreSnapshot>,
}

impl MemoryStore {
    /// Create an empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store seeded with institutions
    #[must_use]
    pub fn with_institutions(institutions: Vec<Institution>) -> Self {
        let mut snapshot = StoreSnapshot::default();
        for institution in institutions {
            snapshot.institutions.insert(institution.id.clone(), institution);
        }
        Self {
            state: RwLock::new(snapshot),
        }
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, StoreSnapshot>> {
        self.state.read().map_err(|_| WorkflowError::storage("memory store lock poisoned"))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, StoreSnapshot>> {
        self.state.write().map_err(|_| WorkflowError::storage("memory store lock poisoned"))
    }
}

impl RequestStore for MemoryStore {
    fn insert(&self, request: VerificationRequest) -> Result<VerificationRequest> {
        self.write()?.insert_request(request)
    }

    fn get(&self, id: &str) -> Result<VerificationRequest> {
        self.read()?.request(id)
    }

    fn update(&self, request: VerificationRequest) -> Result<VerificationRequest> {
        self.write()?.update_request(request)
    }

    fn list(&self) -> Result<Vec<VerificationRequest>> {
        Ok(self.read()?.requests.clone())
    }

    fn next_sequence(&self) -> Result<u64> {
        Ok(self.write()?.next_sequence())
    }
}

impl InstitutionDirectory for MemoryStore {
    fn register(&self, institution: Institution) -> Result<Institution> {
        self.write()?.register(institution)
    }

    fn institution(&self, id: &str) -> Result<Institution> {
        self.read()?.institution(id)
    }

    fn institutions(&self) -> Result<Vec<Institution>> {
        Ok(self.read()?.institutions.values().cloned().collect())
    }
}
