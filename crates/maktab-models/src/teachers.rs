//! Teacher register models and DTOs.
//!
//! Teachers follow the same three-register layout as students but are keyed
//! by name, with no cross-table checks between categories.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// Which physical teacher register a record belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TeacherCategory {
    General,
    Adult,
    Men,
}

impl TeacherCategory {
    /// The table backing this register.
    pub fn table(self) -> &'static str {
        match self {
            Self::General => "teachers",
            Self::Adult => "adult_teachers",
            Self::Men => "men_teachers",
        }
    }

    /// Singular label used in API messages ("Adult teacher not found...").
    pub fn label(self) -> &'static str {
        match self {
            Self::General => "Teacher",
            Self::Adult => "Adult teacher",
            Self::Men => "Men teacher",
        }
    }
}

/// A teacher register entry.
#[derive(Serialize, FromRow, Debug, Clone, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Teacher {
    pub id: i64,
    pub name: String,
    pub class_teaching: String,
    #[sqlx(default)]
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
    #[sqlx(default)]
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
}

/// DTO for creating a new teacher.
#[derive(Deserialize, Debug, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateTeacherDto {
    #[validate(length(min = 1, max = 150))]
    pub name: String,
    #[validate(length(min = 1, max = 100))]
    pub class_teaching: String,
}

/// DTO for updating an existing teacher (full replacement).
#[derive(Deserialize, Debug, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTeacherDto {
    #[validate(length(min = 1, max = 150))]
    pub name: String,
    #[validate(length(min = 1, max = 100))]
    pub class_teaching: String,
}

/// DTO for the teacher access lookup (exact name + class match).
///
/// Fields are optional at the type level; the handler rejects the request
/// with a combined message when either is missing.
#[derive(Deserialize, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TeacherAccessDto {
    pub name: Option<String>,
    pub class_teaching: Option<String>,
}

/// Name search query (case-insensitive contains).
#[derive(Deserialize, Debug, IntoParams)]
pub struct NameSearchParams {
    pub name: String,
}
