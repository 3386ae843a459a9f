//! Institution directory port

use crate::core::Result;
use crate::core::models::Institution;

/// Registry of participating institutions
pub trait InstitutionDirectory: Send + Sync {
    /// Register an institution
    ///
    /// Fails with `AlreadyExists` if the id is taken.
    fn register(&self, institution: Institution) -> Result<Institution>;

    /// Look up an institution, failing with `NotFound`
    fn institution(&self, id: &str) -> Result<Institution>;

    /// All institutions, ordered by id
    fn institutions(&self) -> Result<Vec<Institution>>;
}
