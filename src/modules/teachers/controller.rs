//! Handlers for the three teacher registers.
//!
//! One handler set serves `/api/teachers`, `/api/adult-teachers` and
//! `/api/men-teachers`; the router injects the [`TeacherCategory`] for each
//! nest. The OpenAPI annotations document the general register paths.

use crate::modules::teachers::model::{
    CreateTeacherDto, NameSearchParams, Teacher, TeacherAccessDto, TeacherCategory,
    UpdateTeacherDto,
};
use crate::modules::teachers::service::TeacherService;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::validator::ValidatedJson;
use anyhow::anyhow;
use axum::{
    Extension, Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use maktab_models::{ErrorResponse, MessageResponse};
use tracing::instrument;

#[utoipa::path(
    get,
    path = "/api/teachers",
    responses(
        (status = 200, description = "All teachers in the register", body = Vec<Teacher>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Teachers"
)]
#[instrument(skip(state))]
pub async fn get_teachers(
    State(state): State<AppState>,
    Extension(category): Extension<TeacherCategory>,
) -> Result<Json<Vec<Teacher>>, AppError> {
    let teachers = TeacherService::get_all_teachers(state.store.as_ref(), category).await?;
    Ok(Json(teachers))
}

#[utoipa::path(
    post,
    path = "/api/teachers",
    request_body = CreateTeacherDto,
    responses(
        (status = 201, description = "Teacher created", body = Teacher),
        (status = 400, description = "Name already taken or invalid input", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Teachers"
)]
#[instrument(skip(state, dto))]
pub async fn create_teacher(
    State(state): State<AppState>,
    Extension(category): Extension<TeacherCategory>,
    ValidatedJson(dto): ValidatedJson<CreateTeacherDto>,
) -> Result<(StatusCode, Json<Teacher>), AppError> {
    let teacher = TeacherService::create_teacher(state.store.as_ref(), category, dto).await?;
    Ok((StatusCode::CREATED, Json(teacher)))
}

#[utoipa::path(
    get,
    path = "/api/teachers/{id}",
    params(("id" = i64, Path, description = "Database ID")),
    responses(
        (status = 200, description = "Teacher details", body = Teacher),
        (status = 404, description = "Teacher not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Teachers"
)]
#[instrument(skip(state))]
pub async fn get_teacher(
    State(state): State<AppState>,
    Extension(category): Extension<TeacherCategory>,
    Path(id): Path<i64>,
) -> Result<Json<Teacher>, AppError> {
    let teacher = TeacherService::get_teacher(state.store.as_ref(), category, id).await?;
    Ok(Json(teacher))
}

#[utoipa::path(
    put,
    path = "/api/teachers/{id}",
    params(("id" = i64, Path, description = "Database ID")),
    request_body = UpdateTeacherDto,
    responses(
        (status = 200, description = "Teacher updated", body = Teacher),
        (status = 400, description = "New name already taken", body = ErrorResponse),
        (status = 404, description = "Teacher not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Teachers"
)]
#[instrument(skip(state, dto))]
pub async fn update_teacher(
    State(state): State<AppState>,
    Extension(category): Extension<TeacherCategory>,
    Path(id): Path<i64>,
    ValidatedJson(dto): ValidatedJson<UpdateTeacherDto>,
) -> Result<Json<Teacher>, AppError> {
    let teacher = TeacherService::update_teacher(state.store.as_ref(), category, id, dto).await?;
    Ok(Json(teacher))
}

#[utoipa::path(
    delete,
    path = "/api/teachers/{id}",
    params(("id" = i64, Path, description = "Database ID")),
    responses(
        (status = 200, description = "Teacher deleted", body = MessageResponse),
        (status = 404, description = "Teacher not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Teachers"
)]
#[instrument(skip(state))]
pub async fn delete_teacher(
    State(state): State<AppState>,
    Extension(category): Extension<TeacherCategory>,
    Path(id): Path<i64>,
) -> Result<Json<MessageResponse>, AppError> {
    TeacherService::delete_teacher(state.store.as_ref(), category, id).await?;
    Ok(Json(MessageResponse::new(format!(
        "{} deleted successfully",
        category.label()
    ))))
}

#[utoipa::path(
    get,
    path = "/api/teachers/search",
    params(NameSearchParams),
    responses(
        (status = 200, description = "Teachers matching by name", body = Vec<Teacher>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Teachers"
)]
#[instrument(skip(state))]
pub async fn search_teachers(
    State(state): State<AppState>,
    Extension(category): Extension<TeacherCategory>,
    Query(params): Query<NameSearchParams>,
) -> Result<Json<Vec<Teacher>>, AppError> {
    let teachers =
        TeacherService::search_teachers(state.store.as_ref(), category, &params.name).await?;
    Ok(Json(teachers))
}

#[utoipa::path(
    post,
    path = "/api/teachers/access",
    request_body = TeacherAccessDto,
    responses(
        (status = 200, description = "Teacher matching the name and class", body = Teacher),
        (status = 400, description = "Name or class missing", body = ErrorResponse),
        (status = 404, description = "No teacher with that name and class", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Teachers"
)]
#[instrument(skip(state, dto))]
pub async fn access_teacher(
    State(state): State<AppState>,
    Extension(category): Extension<TeacherCategory>,
    Json(dto): Json<TeacherAccessDto>,
) -> Result<Json<Teacher>, AppError> {
    let (Some(name), Some(class_teaching)) = (dto.name, dto.class_teaching) else {
        return Err(AppError::bad_request(anyhow!(
            "Name and classTeaching are required"
        )));
    };

    let teacher = TeacherService::get_teacher_by_name_and_class(
        state.store.as_ref(),
        category,
        &name,
        &class_teaching,
    )
    .await?;
    Ok(Json(teacher))
}
