//! HTTP server adapters
//!
//! This module provides adapters that translate between HTTP frameworks
//! and the HTTP-agnostic API layer.
//!
//! Currently supported:
//! - `tiny_http` - Lightweight HTTP server for CLI use

pub mod tiny_http;

pub use self::tiny_http::{Identity, Reply, actor_from_headers, route, serve};
