//! Student data models and DTOs.
//!
//! This module re-exports student models from the `maktab-models` crate so
//! handlers and routers keep module-local imports.

// Re-export all student models from the shared crate
pub use maktab_models::{
    CreateStudentDto, CreateStudentParams, SearchParams, Student, StudentCategory,
    TeacherClassParams, TransferStudentDto, UpdateClassParams, UpdateStudentDto,
};
