//! docverify - Multi-phase verification workflow for academic document verification
//!
//! This library provides the verification request lifecycle: submission, the four
//! role-gated review phases, scoring, and completion or rejection. It exposes the
//! workflow through an HTTP-agnostic API layer, an optional `tiny_http` server and
//! the `docverify` CLI.

// Deny all clippy warnings in this crate
#![deny(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    missing_debug_implementations,
    missing_copy_implementations,
    trivial_casts,
    trivial_numeric_casts,
    unsafe_code,
    unused_import_braces,
    unused_qualifications
)]
// Allow some pedantic lints that are too noisy or not applicable
#![allow(
    clippy::module_name_repetitions,
    clippy::missing_errors_doc,
    clippy::cargo_common_metadata
)]

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod adapters;
pub mod api;
pub mod config;
pub mod core;
pub mod output;
pub mod paths;
#[cfg(feature = "server")]
pub mod server;
