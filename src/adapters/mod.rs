//! Adapter implementations for port traits
//!
//! This module contains concrete implementations that handle I/O:
//!
//! - `memory/` - In-process store
//! - `file/` - JSON file store under the data directory
//! - `scoring/` - Phase scoring strategies
//! - `snapshot` - Store contents and the insert/update rules both stores share

pub mod file;
pub mod memory;
pub mod scoring;
mod snapshot;

pub use file::JsonFileStore;
pub use memory::MemoryStore;
pub use scoring::{FixedScorer, RandomScorer};
pub use snapshot::StoreSnapshot;
