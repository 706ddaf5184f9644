//! Handlers for the pre-registration duplicate probes.

use crate::modules::duplicate_check::model::{DuplicateCheckResponse, NameCheckParams};
use crate::modules::duplicate_check::service::DuplicateCheckService;
use crate::state::AppState;
use crate::utils::errors::AppError;
use axum::{
    Json,
    extract::{Path, Query, State},
};
use maktab_models::ErrorResponse;
use tracing::instrument;

#[utoipa::path(
    get,
    path = "/api/check-duplicate/student/{studentId}",
    params(("studentId" = String, Path, description = "Assigned student ID to probe")),
    responses(
        (status = 200, description = "Probe outcome across all registers and the exclusion ledger", body = DuplicateCheckResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Duplicate check"
)]
#[instrument(skip(state))]
pub async fn check_student_duplicate(
    State(state): State<AppState>,
    Path(student_id): Path<String>,
) -> Result<Json<DuplicateCheckResponse>, AppError> {
    let outcome = DuplicateCheckService::check_student_id(
        state.store.as_ref(),
        state.clock.as_ref(),
        &student_id,
    )
    .await?;
    Ok(Json(outcome))
}

#[utoipa::path(
    get,
    path = "/api/check-duplicate/name",
    params(NameCheckParams),
    responses(
        (status = 200, description = "Probe outcome for the (name, student ID) pair", body = DuplicateCheckResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Duplicate check"
)]
#[instrument(skip(state))]
pub async fn check_name_duplicate(
    State(state): State<AppState>,
    Query(params): Query<NameCheckParams>,
) -> Result<Json<DuplicateCheckResponse>, AppError> {
    let outcome = DuplicateCheckService::check_name(
        state.store.as_ref(),
        &params.name,
        params.student_id.as_deref(),
    )
    .await?;
    Ok(Json(outcome))
}
