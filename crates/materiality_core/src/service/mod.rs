//! Use-case orchestration above store, controller and repository.
//!
//! # Responsibility
//! - Own the page-level lifecycle of a matrix editor session.
//! - Keep UI/FFI layers decoupled from storage details.

pub mod matrix_session;
