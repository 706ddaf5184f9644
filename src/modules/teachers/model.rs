//! Teacher data models and DTOs.
//!
//! This module re-exports teacher models from the `maktab-models` crate so
//! handlers and routers keep module-local imports.

// Re-export all teacher models from the shared crate
pub use maktab_models::{
    CreateTeacherDto, NameSearchParams, Teacher, TeacherAccessDto, TeacherCategory,
    UpdateTeacherDto,
};
