//! Core domain logic for docverify
//!
//! This module contains the verification workflow with no I/O dependencies.
//! Persistence and scoring are abstracted through port traits.
//!
//! ## Architecture
//!
//! - `models/` - Domain types (`VerificationRequest`, `Phase`, `Actor`, `Document`)
//! - `services/` - Phase processing, authorization policy, workflow orchestration
//! - `ports/` - Trait definitions for stores and scoring strategies
//! - `error` - The workflow error taxonomy

pub mod error;
pub mod models;
pub mod ports;
pub mod services;

pub use error::{Result, WorkflowError};
