//! Exclusion ledger models and DTOs.
//!
//! An [`ExcludedStudent`] is a denormalized snapshot of a general-register
//! student at the moment of exclusion, plus the exclusion metadata. Rows
//! only ever enter the ledger through the exclusion flow and only leave it
//! through manual deletion or the retention sweep.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

use crate::students::Student;

/// A row in the exclusion ledger.
#[derive(Serialize, FromRow, Debug, Clone, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ExcludedStudent {
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
    pub excluded_date: chrono::NaiveDate,
    pub excluded_by: String,
    pub reason: String,
    pub exclusion_type: String,
    #[sqlx(default)]
    pub additional_notes: Option<String>,
    #[sqlx(default)]
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
}

/// Insert payload for the exclusion ledger.
///
/// Built by [`NewExcludedStudent::snapshot`] from a loaded student record
/// plus verified exclusion metadata; never constructed from client input
/// directly (`excluded_date` in particular is always set server-side).
#[derive(Debug, Clone)]
pub struct NewExcludedStudent {
    pub student_id: String,
    pub name: String,
    pub gender: String,
    pub date_joined: chrono::NaiveDate,
    pub location: String,
    pub madrassa_location: Option<String>,
    pub shoe_size: Option<String>,
    pub cell: String,
    pub ustadh: String,
    pub class_teaching: String,
    pub excluded_date: chrono::NaiveDate,
    pub excluded_by: String,
    pub reason: String,
    pub exclusion_type: String,
    pub additional_notes: Option<String>,
}

impl NewExcludedStudent {
    /// Snapshot every field of an active student into a ledger entry.
    pub fn snapshot(
        student: &Student,
        excluded_by: String,
        reason: String,
        exclusion_type: String,
        additional_notes: Option<String>,
        excluded_date: chrono::NaiveDate,
    ) -> Self {
        Self {
            student_id: student.student_id.clone(),
            name: student.name.clone(),
            gender: student.gender.clone(),
            date_joined: student.date_joined,
            location: student.location.clone(),
            madrassa_location: student.madrassa_location.clone(),
            shoe_size: student.shoe_size.clone(),
            cell: student.cell.clone(),
            ustadh: student.ustadh.clone(),
            class_teaching: student.class_teaching.clone(),
            excluded_date,
            excluded_by,
            reason,
            exclusion_type,
            additional_notes,
        }
    }
}

/// DTO for the exclusion request.
///
/// Fields are optional at the type level; the handler rejects the request
/// with a combined message when any of the three required fields is blank.
#[derive(Deserialize, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ExcludeStudentDto {
    pub excluded_by: Option<String>,
    pub reason: Option<String>,
    pub exclusion_type: Option<String>,
    pub additional_notes: Option<String>,
}

/// Response for a successful exclusion.
#[derive(Serialize, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ExcludeStudentResponse {
    pub message: String,
    pub excluded_student: ExcludedStudent,
}

/// Aggregate counts over the exclusion ledger.
///
/// `transferred`, `dropped_out` and `completed` count the conventional
/// `exclusion_type` tags; free-form tags only contribute to the total.
#[derive(Serialize, FromRow, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ExclusionStatistics {
    pub total_excluded: i64,
    pub this_month: i64,
    pub transferred: i64,
    pub dropped_out: i64,
    pub completed: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_student() -> Student {
        Student {
            id: 42,
            student_id: "STD-042".to_string(),
            name: "Bilal Hassan".to_string(),
            gender: "Male".to_string(),
            date_joined: chrono::NaiveDate::from_ymd_opt(2022, 1, 10).unwrap(),
            location: "South B".to_string(),
            madrassa_location: Some("Annex".to_string()),
            shoe_size: Some("38".to_string()),
            cell: "0700111222".to_string(),
            ustadh: "Ustadh Musa".to_string(),
            class_teaching: "C2".to_string(),
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn test_snapshot_copies_every_student_field() {
        let student = sample_student();
        let date = chrono::NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
        let snapshot = NewExcludedStudent::snapshot(
            &student,
            "Admin".to_string(),
            "Moved away".to_string(),
            "transfer".to_string(),
            Some("Family relocated".to_string()),
            date,
        );
        assert_eq!(snapshot.student_id, student.student_id);
        assert_eq!(snapshot.name, student.name);
        assert_eq!(snapshot.gender, student.gender);
        assert_eq!(snapshot.date_joined, student.date_joined);
        assert_eq!(snapshot.location, student.location);
        assert_eq!(snapshot.madrassa_location, student.madrassa_location);
        assert_eq!(snapshot.shoe_size, student.shoe_size);
        assert_eq!(snapshot.cell, student.cell);
        assert_eq!(snapshot.ustadh, student.ustadh);
        assert_eq!(snapshot.class_teaching, student.class_teaching);
        assert_eq!(snapshot.excluded_date, date);
        assert_eq!(snapshot.exclusion_type, "transfer");
    }

    #[test]
    fn test_exclude_dto_accepts_missing_fields() {
        let dto: ExcludeStudentDto = serde_json::from_str("{}").unwrap();
        assert!(dto.excluded_by.is_none());
        assert!(dto.reason.is_none());
        assert!(dto.exclusion_type.is_none());
    }

    #[test]
    fn test_excluded_student_serializes_camel_case() {
        let excluded = ExcludedStudent {
            id: 1,
            student_id: "STD-042".to_string(),
            name: "Bilal Hassan".to_string(),
            gender: "Male".to_string(),
            date_joined: chrono::NaiveDate::from_ymd_opt(2022, 1, 10).unwrap(),
            location: "South B".to_string(),
            madrassa_location: None,
            shoe_size: None,
            cell: "0700111222".to_string(),
            ustadh: "Ustadh Musa".to_string(),
            class_teaching: "C2".to_string(),
            excluded_date: chrono::NaiveDate::from_ymd_opt(2024, 3, 5).unwrap(),
            excluded_by: "Admin".to_string(),
            reason: "Moved away".to_string(),
            exclusion_type: "transfer".to_string(),
            additional_notes: None,
            created_at: None,
        };
        let json = serde_json::to_value(&excluded).unwrap();
        assert_eq!(json["excludedDate"], "2024-03-05");
        assert_eq!(json["exclusionType"], "transfer");
        assert_eq!(json["excludedBy"], "Admin");
    }
}
