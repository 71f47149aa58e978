//! FFI bridge crate for the materiality matrix UI.
//!
//! Wraps `materiality_core` use-cases in UI-friendly, panic-free calls.

pub mod api;
