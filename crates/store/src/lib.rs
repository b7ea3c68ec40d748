//! Volatile, process-local storage for BookFinder entities.
//!
//! Each entity type lives in its own [`Registry`]: an unordered list scanned
//! linearly by identifier. Nothing survives a restart.

pub mod registry;

pub use registry::{Entity, Registry, StoreError};
