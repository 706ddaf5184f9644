//! Registration duplicate-probe responses.

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

/// Outcome of a duplicate probe.
///
/// `check_type` and `data` are present only when a match was found; `data`
/// carries the full matching record (active student or ledger entry).
#[derive(Serialize, Debug, ToSchema)]
pub struct DuplicateCheckResponse {
    pub exists: bool,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub check_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Object)]
    pub data: Option<serde_json::Value>,
    pub message: String,
}

impl DuplicateCheckResponse {
    /// A probe that found a matching record.
    pub fn found(
        check_type: &str,
        data: Option<serde_json::Value>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            exists: true,
            check_type: Some(check_type.to_string()),
            data,
            message: message.into(),
        }
    }

    /// A probe that found nothing blocking.
    pub fn available(message: impl Into<String>) -> Self {
        Self {
            exists: false,
            check_type: None,
            data: None,
            message: message.into(),
        }
    }
}

/// Query parameters for the name duplicate check.
///
/// The pair check only runs when `studentId` is present and non-blank.
#[derive(Deserialize, Debug, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct NameCheckParams {
    pub name: String,
    pub student_id: Option<String>,
}
