//! Repository layer for persisted matrix state.
//!
//! # Responsibility
//! - Define the storage contract used by matrix sessions.
//! - Isolate SQLite details from interaction and store logic.
//!
//! # Invariants
//! - Missing rows surface as `RepoError::NotFound` on writes.

pub mod topic_repo;
