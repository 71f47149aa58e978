//! Matrix editor input handling.
//!
//! # Responsibility
//! - Bridge pointer/keyboard input to the coordinate mapper and topic store.
//! - Publish explicit change notifications to the presentation layer.
//!
//! # See also
//! - `crate::mapper`, `crate::store`

pub mod controller;
pub mod subscription;
