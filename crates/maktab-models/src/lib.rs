//! # Maktab Models
//!
//! Domain models and DTOs for the Maktab API.
//!
//! This crate provides all data structures used throughout the Maktab
//! application: register entities, request/response DTOs, validation schemas,
//! and the category enums that map one Rust type onto the parallel physical
//! tables (general/adult/men registers).
//!
//! # Modules
//!
//! - [`common`]: Shared response types
//! - [`duplicate_check`]: Registration duplicate-probe responses
//! - [`excluded_students`]: Exclusion ledger models
//! - [`students`]: Student register models
//! - [`teachers`]: Teacher register models
//! - [`ustaads`]: Ustaad (senior teacher) models

pub mod common;
pub mod duplicate_check;
pub mod excluded_students;
pub mod students;
pub mod teachers;
pub mod ustaads;

// Re-export commonly used types at crate root for convenience
pub use common::{ErrorResponse, MessageResponse};

pub use students::{
    CreateStudentDto, CreateStudentParams, SearchParams, Student, StudentCategory,
    TeacherClassParams, TransferStudentDto, UpdateClassParams, UpdateStudentDto,
};

pub use teachers::{
    CreateTeacherDto, NameSearchParams, Teacher, TeacherAccessDto, TeacherCategory,
    UpdateTeacherDto,
};

pub use ustaads::{CreateUstaadDto, UpdateUstaadDto, Ustaad};

pub use excluded_students::{
    ExcludeStudentDto, ExcludeStudentResponse, ExcludedStudent, ExclusionStatistics,
    NewExcludedStudent,
};

pub use duplicate_check::{DuplicateCheckResponse, NameCheckParams};
