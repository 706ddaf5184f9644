//! Duplicate-probe models.
//!
//! This module re-exports the probe response and query types from the
//! `maktab-models` crate so handlers and routers keep module-local imports.

// Re-export duplicate-check models from the shared crate
pub use maktab_models::{DuplicateCheckResponse, NameCheckParams};
