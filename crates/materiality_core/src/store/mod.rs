//! Topic store and read-side filters.
//!
//! # Responsibility
//! - Hold the authoritative topic list for one matrix instance.
//! - Offer predicate-based read access for presentation and page filters.
//!
//! # Invariants
//! - External readers only ever receive shared references or snapshots.

pub mod filter;
pub mod topic_store;
