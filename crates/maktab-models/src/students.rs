//! Student register models and DTOs.
//!
//! The madrassa keeps three structurally identical student registers
//! (general, adult, men) in separate tables. One entity type serves all
//! three; [`StudentCategory`] selects the physical table and carries the
//! per-register wording used in API messages.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// Which physical student register a record belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StudentCategory {
    General,
    Adult,
    Men,
}

impl StudentCategory {
    /// All categories in duplicate-probe order (general first).
    pub const ALL: [StudentCategory; 3] = [Self::General, Self::Adult, Self::Men];

    /// The table backing this register.
    pub fn table(self) -> &'static str {
        match self {
            Self::General => "students",
            Self::Adult => "adult_students",
            Self::Men => "men_students",
        }
    }

    /// Singular label used in API messages ("Adult student not found...").
    pub fn label(self) -> &'static str {
        match self {
            Self::General => "Student",
            Self::Adult => "Adult student",
            Self::Men => "Men student",
        }
    }

    /// Plural label used in bulk-operation messages.
    pub fn collective(self) -> &'static str {
        match self {
            Self::General => "students",
            Self::Adult => "adult students",
            Self::Men => "men students",
        }
    }

    /// The `type` tag reported by the duplicate-check endpoint.
    pub fn registration_type(self) -> &'static str {
        match self {
            Self::General => "REGULAR_STUDENT",
            Self::Adult => "ADULT_STUDENT",
            Self::Men => "MEN_STUDENT",
        }
    }

    /// Phrase used in duplicate-check messages ("already registered ...").
    pub fn registered_phrase(self) -> &'static str {
        match self {
            Self::General => "as regular student",
            Self::Adult => "as adult student",
            Self::Men => "in men's list",
        }
    }
}

/// A student register entry.
///
/// This struct represents the student entity stored in the database. The
/// same shape is stored in all three registers; `madrassa_location` and
/// `shoe_size` are recorded for general students and left empty elsewhere.
#[derive(Serialize, FromRow, Debug, Clone, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    pub id: i64,
    pub student_id: String,
    pub name: String,
    pub gender: String,
    pub date_joined: chrono::NaiveDate,
    pub location: String,
    #[sqlx(default)]
    pub madrassa_location: Option<String>,
    #[sqlx(default)]
    pub shoe_size: Option<String>,
    pub cell: String,
    pub ustadh: String,
    pub class_teaching: String,
    #[sqlx(default)]
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
    #[sqlx(default)]
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
}

/// DTO for registering a new student.
#[derive(Deserialize, Debug, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateStudentDto {
    #[validate(length(min = 1, max = 50))]
    pub student_id: String,
    #[validate(length(min = 1, max = 150))]
    pub name: String,
    #[validate(length(min = 1, max = 20))]
    pub gender: String,
    pub date_joined: chrono::NaiveDate,
    #[validate(length(min = 1, max = 150))]
    pub location: String,
    #[validate(length(max = 150))]
    pub madrassa_location: Option<String>,
    #[validate(length(max = 20))]
    pub shoe_size: Option<String>,
    #[validate(length(min = 1, max = 50))]
    pub cell: String,
    #[validate(length(min = 1, max = 150))]
    pub ustadh: String,
    #[validate(length(min = 1, max = 100))]
    pub class_teaching: String,
}

/// DTO for updating an existing student.
///
/// Updates are full replacements; every required field must be supplied.
#[derive(Deserialize, Debug, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStudentDto {
    #[validate(length(min = 1, max = 50))]
    pub student_id: String,
    #[validate(length(min = 1, max = 150))]
    pub name: String,
    #[validate(length(min = 1, max = 20))]
    pub gender: String,
    pub date_joined: chrono::NaiveDate,
    #[validate(length(min = 1, max = 150))]
    pub location: String,
    #[validate(length(max = 150))]
    pub madrassa_location: Option<String>,
    #[validate(length(max = 20))]
    pub shoe_size: Option<String>,
    #[validate(length(min = 1, max = 50))]
    pub cell: String,
    #[validate(length(min = 1, max = 150))]
    pub ustadh: String,
    #[validate(length(min = 1, max = 100))]
    pub class_teaching: String,
}

/// Query parameters for student registration.
#[derive(Deserialize, Debug, IntoParams)]
pub struct CreateStudentParams {
    /// Skip every duplicate check (re-admission of a previously excluded
    /// student whose retention window has lapsed). No server-side
    /// verification is performed.
    #[serde(default)]
    pub restore: bool,
}

/// DTO for transferring a student to another teacher/class.
///
/// All fields are optional at the type level; the handler rejects the
/// request with a combined message when any required field is blank.
/// `transferredBy` and `notes` are accepted but not persisted.
#[derive(Deserialize, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TransferStudentDto {
    pub new_ustadh: Option<String>,
    pub new_class_teaching: Option<String>,
    pub transferred_by: Option<String>,
    pub notes: Option<String>,
}

/// Query parameters identifying a teacher + class pair.
#[derive(Deserialize, Debug, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct TeacherClassParams {
    pub ustadh: String,
    pub class_teaching: String,
}

/// Query parameters for the bulk class reassignment operation.
#[derive(Deserialize, Debug, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct UpdateClassParams {
    pub ustadh: String,
    pub old_class_teaching: String,
    pub new_class_teaching: String,
}

/// Free-text search query (matches name or student ID).
#[derive(Deserialize, Debug, IntoParams)]
pub struct SearchParams {
    pub q: String,
}
