//! Handlers for the exclusion ledger and the exclusion flow itself.
//!
//! The ledger has no create endpoint; rows only appear through
//! `POST /api/exclude/student/{id}` and only leave through the permanent
//! delete or the retention sweep.

use crate::modules::excluded_students::model::{
    ExcludeStudentDto, ExcludeStudentResponse, ExcludedStudent, ExclusionStatistics,
};
use crate::modules::excluded_students::service::ExcludedStudentService;
use crate::modules::students::model::{SearchParams, TeacherClassParams};
use crate::state::AppState;
use crate::utils::errors::AppError;
use anyhow::anyhow;
use axum::{
    Json,
    extract::{Path, Query, State},
};
use maktab_models::{ErrorResponse, MessageResponse};
use tracing::instrument;

#[utoipa::path(
    get,
    path = "/api/excluded-students",
    responses(
        (status = 200, description = "The exclusion ledger, most recent first", body = Vec<ExcludedStudent>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Excluded students"
)]
#[instrument(skip(state))]
pub async fn get_excluded_students(
    State(state): State<AppState>,
) -> Result<Json<Vec<ExcludedStudent>>, AppError> {
    let excluded = ExcludedStudentService::get_all_excluded_students(state.store.as_ref()).await?;
    Ok(Json(excluded))
}

#[utoipa::path(
    get,
    path = "/api/excluded-students/{id}",
    params(("id" = i64, Path, description = "Ledger row ID")),
    responses(
        (status = 200, description = "Excluded student details", body = ExcludedStudent),
        (status = 404, description = "Excluded student not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Excluded students"
)]
#[instrument(skip(state))]
pub async fn get_excluded_student(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ExcludedStudent>, AppError> {
    let excluded = ExcludedStudentService::get_excluded_student(state.store.as_ref(), id).await?;
    Ok(Json(excluded))
}

#[utoipa::path(
    get,
    path = "/api/excluded-students/by-teacher/{ustadh}",
    params(("ustadh" = String, Path, description = "Teacher name")),
    responses(
        (status = 200, description = "Exclusions among the teacher's students", body = Vec<ExcludedStudent>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Excluded students"
)]
#[instrument(skip(state))]
pub async fn get_excluded_students_by_teacher(
    State(state): State<AppState>,
    Path(ustadh): Path<String>,
) -> Result<Json<Vec<ExcludedStudent>>, AppError> {
    let excluded =
        ExcludedStudentService::get_excluded_students_by_teacher(state.store.as_ref(), &ustadh)
            .await?;
    Ok(Json(excluded))
}

#[utoipa::path(
    get,
    path = "/api/excluded-students/by-teacher-class",
    params(TeacherClassParams),
    responses(
        (status = 200, description = "Exclusions in the teacher's class", body = Vec<ExcludedStudent>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Excluded students"
)]
#[instrument(skip(state))]
pub async fn get_excluded_students_by_teacher_class(
    State(state): State<AppState>,
    Query(params): Query<TeacherClassParams>,
) -> Result<Json<Vec<ExcludedStudent>>, AppError> {
    let excluded = ExcludedStudentService::get_excluded_students_by_teacher_and_class(
        state.store.as_ref(),
        &params.ustadh,
        &params.class_teaching,
    )
    .await?;
    Ok(Json(excluded))
}

#[utoipa::path(
    get,
    path = "/api/excluded-students/this-month",
    responses(
        (status = 200, description = "Exclusions dated in the current calendar month", body = Vec<ExcludedStudent>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Excluded students"
)]
#[instrument(skip(state))]
pub async fn get_excluded_students_this_month(
    State(state): State<AppState>,
) -> Result<Json<Vec<ExcludedStudent>>, AppError> {
    let excluded = ExcludedStudentService::get_excluded_students_this_month(
        state.store.as_ref(),
        state.clock.as_ref(),
    )
    .await?;
    Ok(Json(excluded))
}

#[utoipa::path(
    get,
    path = "/api/excluded-students/search",
    params(SearchParams),
    responses(
        (status = 200, description = "Ledger rows matching by name, student ID or reason", body = Vec<ExcludedStudent>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Excluded students"
)]
#[instrument(skip(state))]
pub async fn search_excluded_students(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<ExcludedStudent>>, AppError> {
    let excluded =
        ExcludedStudentService::search_excluded_students(state.store.as_ref(), &params.q).await?;
    Ok(Json(excluded))
}

#[utoipa::path(
    delete,
    path = "/api/excluded-students/{id}",
    params(("id" = i64, Path, description = "Ledger row ID")),
    responses(
        (status = 200, description = "Ledger row permanently deleted", body = MessageResponse),
        (status = 404, description = "Excluded student not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Excluded students"
)]
#[instrument(skip(state))]
pub async fn delete_excluded_student(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<MessageResponse>, AppError> {
    ExcludedStudentService::delete_excluded_student(state.store.as_ref(), id).await?;
    Ok(Json(MessageResponse::new(
        "Excluded student permanently deleted",
    )))
}

#[utoipa::path(
    get,
    path = "/api/excluded-students/statistics",
    responses(
        (status = 200, description = "Exclusion counts, total and by conventional type tags", body = ExclusionStatistics),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Excluded students"
)]
#[instrument(skip(state))]
pub async fn get_statistics(
    State(state): State<AppState>,
) -> Result<Json<ExclusionStatistics>, AppError> {
    let stats =
        ExcludedStudentService::get_statistics(state.store.as_ref(), state.clock.as_ref()).await?;
    Ok(Json(stats))
}

#[utoipa::path(
    post,
    path = "/api/exclude/student/{id}",
    params(("id" = i64, Path, description = "Active student's database ID")),
    request_body = ExcludeStudentDto,
    responses(
        (status = 200, description = "Student moved to the exclusion ledger", body = ExcludeStudentResponse),
        (status = 400, description = "Required exclusion fields missing or blank", body = ErrorResponse),
        (status = 404, description = "Student not found", body = ErrorResponse),
        (status = 409, description = "Student ID already on the ledger", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Excluded students"
)]
#[instrument(skip(state, dto))]
pub async fn exclude_student(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(dto): Json<ExcludeStudentDto>,
) -> Result<Json<ExcludeStudentResponse>, AppError> {
    let required = |field: Option<String>| {
        field
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    };
    let (Some(excluded_by), Some(reason), Some(exclusion_type)) = (
        required(dto.excluded_by),
        required(dto.reason),
        required(dto.exclusion_type),
    ) else {
        return Err(AppError::bad_request(anyhow!(
            "excludedBy, reason, and exclusionType are required"
        )));
    };

    let excluded = ExcludedStudentService::exclude_student(
        state.store.as_ref(),
        state.clock.as_ref(),
        id,
        excluded_by,
        reason,
        exclusion_type,
        dto.additional_notes,
    )
    .await?;

    Ok(Json(ExcludeStudentResponse {
        message: "Student excluded successfully".to_string(),
        excluded_student: excluded,
    }))
}
