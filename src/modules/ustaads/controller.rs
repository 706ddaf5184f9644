//! Handlers for the ustaad register.

use crate::modules::teachers::model::NameSearchParams;
use crate::modules::ustaads::model::{CreateUstaadDto, UpdateUstaadDto, Ustaad};
use crate::modules::ustaads::service::UstaadService;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::validator::ValidatedJson;
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use maktab_models::{ErrorResponse, MessageResponse};
use tracing::instrument;

#[utoipa::path(
    get,
    path = "/api/ustaads",
    responses(
        (status = 200, description = "All ustaads, ordered by name", body = Vec<Ustaad>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Ustaads"
)]
#[instrument(skip(state))]
pub async fn get_ustaads(State(state): State<AppState>) -> Result<Json<Vec<Ustaad>>, AppError> {
    let ustaads = UstaadService::get_all_ustaads(state.store.as_ref()).await?;
    Ok(Json(ustaads))
}

#[utoipa::path(
    post,
    path = "/api/ustaads",
    request_body = CreateUstaadDto,
    responses(
        (status = 201, description = "Ustaad created", body = Ustaad),
        (status = 400, description = "Name already taken or invalid input", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Ustaads"
)]
#[instrument(skip(state, dto))]
pub async fn create_ustaad(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<CreateUstaadDto>,
) -> Result<(StatusCode, Json<Ustaad>), AppError> {
    let ustaad = UstaadService::create_ustaad(state.store.as_ref(), dto).await?;
    Ok((StatusCode::CREATED, Json(ustaad)))
}

#[utoipa::path(
    get,
    path = "/api/ustaads/{id}",
    params(("id" = i64, Path, description = "Database ID")),
    responses(
        (status = 200, description = "Ustaad details", body = Ustaad),
        (status = 404, description = "Ustaad not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Ustaads"
)]
#[instrument(skip(state))]
pub async fn get_ustaad(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Ustaad>, AppError> {
    let ustaad = UstaadService::get_ustaad(state.store.as_ref(), id).await?;
    Ok(Json(ustaad))
}

#[utoipa::path(
    put,
    path = "/api/ustaads/{id}",
    params(("id" = i64, Path, description = "Database ID")),
    request_body = UpdateUstaadDto,
    responses(
        (status = 200, description = "Ustaad updated", body = Ustaad),
        (status = 400, description = "New name already taken", body = ErrorResponse),
        (status = 404, description = "Ustaad not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Ustaads"
)]
#[instrument(skip(state, dto))]
pub async fn update_ustaad(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    ValidatedJson(dto): ValidatedJson<UpdateUstaadDto>,
) -> Result<Json<Ustaad>, AppError> {
    let ustaad = UstaadService::update_ustaad(state.store.as_ref(), id, dto).await?;
    Ok(Json(ustaad))
}

#[utoipa::path(
    delete,
    path = "/api/ustaads/{id}",
    params(("id" = i64, Path, description = "Database ID")),
    responses(
        (status = 200, description = "Ustaad deleted", body = MessageResponse),
        (status = 404, description = "Ustaad not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Ustaads"
)]
#[instrument(skip(state))]
pub async fn delete_ustaad(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<MessageResponse>, AppError> {
    UstaadService::delete_ustaad(state.store.as_ref(), id).await?;
    Ok(Json(MessageResponse::new("Ustaad deleted successfully")))
}

#[utoipa::path(
    get,
    path = "/api/ustaads/search",
    params(NameSearchParams),
    responses(
        (status = 200, description = "Ustaads matching by name", body = Vec<Ustaad>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Ustaads"
)]
#[instrument(skip(state))]
pub async fn search_ustaads(
    State(state): State<AppState>,
    Query(params): Query<NameSearchParams>,
) -> Result<Json<Vec<Ustaad>>, AppError> {
    let ustaads = UstaadService::search_ustaads(state.store.as_ref(), &params.name).await?;
    Ok(Json(ustaads))
}
