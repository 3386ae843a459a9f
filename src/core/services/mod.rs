//! Business logic services
//!
//! - [`phase_processor`] - Thresholds and the phase/status transition
//! - [`policy`] - Who may do what
//! - [`validation`] - Creation payload checks
//! - [`workflow`] - The orchestrator tying store, scorer and policy together

pub mod phase_processor;
pub mod policy;
pub mod validation;
pub mod workflow;

pub use phase_processor::{check_phase, check_score, passes, record_attempt, status_after_pass};
pub use policy::{Action, Capability, authorize, capabilities, has_capability};
pub use validation::validate_new_request;
pub use workflow::{ProcessingOutcome, Workflow};
