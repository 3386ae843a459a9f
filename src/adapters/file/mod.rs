//! JSON file store
//!
//! Implements `RequestStore` and `InstitutionDirectory` on a single JSON
//! document. Every operation loads the file, applies the change and writes it
//! back through a temporary file, so state survives between CLI invocations.
//!
//! The store assumes one writer process at a time. Writers sharing a process
//! are serialized by an internal mutex, and a handle updating from a stale
//! read gets `Conflict`. Two processes writing at the same moment can both
//! load the same version, and the later rename then replaces the earlier
//! write without a version check. Run a single `serve` or CLI writer per file.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::adapters::StoreSnapshot;
use crate::core::models::{Institution, VerificationRequest};
use crate::core::ports::{InstitutionDirectory, RequestStore};
use crate::core::{Result, WorkflowError};

/// Store persisted as one JSON document
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl JsonFileStore {
    /// Open a store at `path`; the file is created on first write
    #[must_use]
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    /// Path of the backing file
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write an empty store unless one exists (or `force` is set)
    pub fn initialize(&self, force: bool) -> Result<bool> {
        if self.path.exists() && !force {
            return Ok(false);
        }
        self.save(&StoreSnapshot::default())?;
        Ok(true)
    }

    /// Load the current contents
    pub fn load(&self) -> Result<StoreSnapshot> {
        if !self.path.exists() {
            return Ok(StoreSnapshot::default());
        }
        let content = fs::read_to_string(&self.path).map_err(WorkflowError::storage)?;
        if content.trim().is_empty() {
            return Ok(StoreSnapshot::default());
        }
        serde_json::from_str(&content).map_err(|e| {
            WorkflowError::storage(format!("corrupt store {}: {e}", self.path.display()))
        })
    }

    fn save(&self, snapshot: &StoreSnapshot) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(WorkflowError::storage)?;
        }
        let content = serde_json::to_string_pretty(snapshot).map_err(WorkflowError::storage)?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, content).map_err(WorkflowError::storage)?;
        fs::rename(&tmp, &self.path).map_err(WorkflowError::storage)?;
        log::debug!("saved store to {}", self.path.display());
        Ok(())
    }

    fn read<T>(&self, f: impl FnOnce(&StoreSnapshot) -> Result<T>) -> Result<T> {
        let _guard = self.lock.lock().map_err(|_| WorkflowError::storage("file store lock poisoned"))?;
        f(&self.load()?)
    }

    fn modify<T>(&self, f: impl FnOnce(&mut StoreSnapshot) -> Result<T>) -> Result<T> {
        let _guard = self.lock.lock().map_err(|_| WorkflowError::storage("file store lock poisoned"))?;
        let mut snapshot = self.load()?;
        let value = f(&mut snapshot)?;
        self.save(&snapshot)?;
        Ok(value)
    }
}

impl RequestStore for JsonFileStore {
    fn insert(&self, request: VerificationRequest) -> Result<VerificationRequest> {
        self.modify(|s| s.insert_request(request))
    }

    fn get(&self, id: &str) -> Result<VerificationRequest> {
        self.read(|s| s.request(id))
    }

    fn update(&self, request: VerificationRequest) -> Result<VerificationRequest> {
        self.modify(|s| s.update_request(request))
    }

    fn list(&self) -> Result<Vec<VerificationRequest>> {
        self.read(|s| Ok(s.requests.clone()))
    }

    fn next_sequence(&self) -> Result<u64> {
        self.modify(|s| Ok(s.next_sequence()))
    }
}

impl InstitutionDirectory for JsonFileStore {
    fn register(&self, institution: Institution) -> Result<Institution> {
        self.modify(|s| s.register(institution))
    }

    fn institution(&self, id: &str) -> Result<Institution> {
        self.read(|s| s.institution(id))
    }

    fn institutions(&self) -> Result<Vec<Institution>> {
        self.read(|s| Ok(s.institutions.values().cloned().collect()))
    }
}
