//! Exclusion ledger models and DTOs.
//!
//! This module re-exports exclusion models from the `maktab-models` crate so
//! handlers and routers keep module-local imports.

// Re-export all exclusion models from the shared crate
pub use maktab_models::{
    ExcludeStudentDto, ExcludeStudentResponse, ExcludedStudent, ExclusionStatistics,
    NewExcludedStudent,
};
