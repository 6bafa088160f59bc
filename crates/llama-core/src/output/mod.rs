//! Output Module
//!
//! Persistence snapshots and the file-backed save store.

pub mod snapshot;
pub mod storage;

pub use snapshot::*;
pub use storage::*;
