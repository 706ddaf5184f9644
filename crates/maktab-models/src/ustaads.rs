//! Ustaad (senior teacher / coordinator) models and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// An ustaad record.
#[derive(Serialize, FromRow, Debug, Clone, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Ustaad {
    pub id: i64,
    pub full_name: String,
    pub class_teaching: String,
    pub center: String,
    pub phone: String,
    pub num_students: i32,
    #[sqlx(default)]
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
    #[sqlx(default)]
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
}

/// DTO for creating a new ustaad.
#[derive(Deserialize, Debug, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateUstaadDto {
    #[validate(length(min = 1, max = 150))]
    pub full_name: String,
    #[validate(length(min = 1, max = 100))]
    pub class_teaching: String,
    #[validate(length(min = 1, max = 150))]
    pub center: String,
    #[validate(length(min = 1, max = 50))]
    pub phone: String,
    #[validate(range(min = 0))]
    pub num_students: i32,
}

/// DTO for updating an existing ustaad (full replacement).
#[derive(Deserialize, Debug, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUstaadDto {
    #[validate(length(min = 1, max = 150))]
    pub full_name: String,
    #[validate(length(min = 1, max = 100))]
    pub class_teaching: String,
    #[validate(length(min = 1, max = 150))]
    pub center: String,
    #[validate(length(min = 1, max = 50))]
    pub phone: String,
    #[validate(range(min = 0))]
    pub num_students: i32,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_dto() -> CreateUstaadDto {
        CreateUstaadDto {
            full_name: "Ustadh Ibrahim".to_string(),
            class_teaching: "A1".to_string(),
            center: "South Center".to_string(),
            phone: "0712345678".to_string(),
            num_students: 24,
        }
    }

    #[test]
    fn test_create_ustaad_dto_validation() {
        assert!(valid_dto().validate().is_ok());
    }

    #[test]
    fn test_create_ustaad_dto_negative_count() {
        let mut dto = valid_dto();
        dto.num_students = -1;
        assert!(dto.validate().is_err());
    }

    #[test]
    fn test_ustaad_serializes_camel_case() {
        let ustaad = Ustaad {
            id: 7,
            full_name: "Ustadh Ibrahim".to_string(),
            class_teaching: "A1".to_string(),
            center: "South Center".to_string(),
            phone: "0712345678".to_string(),
            num_students: 24,
            created_at: None,
            updated_at: None,
        };
        let json = serde_json::to_value(&ustaad).unwrap();
        assert_eq!(json["fullName"], "Ustadh Ibrahim");
        assert_eq!(json["numStudents"], 24);
    }
}
