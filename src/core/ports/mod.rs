//! Port traits (interfaces) for external dependencies
//!
//! These traits define the boundaries between the workflow and the systems
//! around it: where requests and institutions are kept, and how a phase
//! attempt is scored.
//!
//! Implementations live in the `adapters` module.

mod institution_directory;
mod request_store;
mod scorer;

pub use institution_directory::InstitutionDirectory;
pub use request_store::{RequestFilter, RequestStore};
pub use scorer::PhaseScorer;
