//! Ustaad data models and DTOs.
//!
//! This module re-exports ustaad models from the `maktab-models` crate so
//! handlers and routers keep module-local imports.

// Re-export all ustaad models from the shared crate
pub use maktab_models::{CreateUstaadDto, UpdateUstaadDto, Ustaad};
