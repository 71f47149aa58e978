//! Materiality matrix domain model.
//!
//! # Responsibility
//! - Define topics, categories, bounded scores and quadrant labels.
//!
//! # Invariants
//! - Every topic is identified by a stable `TopicId`.
//! - Scores are clamped into `[0, 10]` by construction.

pub mod category;
pub mod quadrant;
pub mod score;
pub mod topic;
