//! Handlers for the three student registers.
//!
//! One handler set serves `/api/students`, `/api/adult-students` and
//! `/api/men-students`; the router injects the [`StudentCategory`] for each
//! nest as an extension. The OpenAPI annotations document the general
//! register paths; the adult and men registers expose the same surface.

use crate::modules::students::model::{
    CreateStudentDto, CreateStudentParams, SearchParams, Student, StudentCategory,
    TeacherClassParams, TransferStudentDto, UpdateClassParams, UpdateStudentDto,
};
use crate::modules::students::service::StudentService;
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
    path = "/api/students",
    responses(
        (status = 200, description = "All students in the register, ordered by name", body = Vec<Student>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Students"
)]
#[instrument(skip(state))]
pub async fn get_students(
    State(state): State<AppState>,
    Extension(category): Extension<StudentCategory>,
) -> Result<Json<Vec<Student>>, AppError> {
    let students = StudentService::get_all_students(state.store.as_ref(), category).await?;
    Ok(Json(students))
}

#[utoipa::path(
    post,
    path = "/api/students",
    params(CreateStudentParams),
    request_body = CreateStudentDto,
    responses(
        (status = 201, description = "Student registered", body = Student),
        (status = 400, description = "Duplicate identity or invalid input", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Students"
)]
#[instrument(skip(state, dto))]
pub async fn create_student(
    State(state): State<AppState>,
    Extension(category): Extension<StudentCategory>,
    Query(params): Query<CreateStudentParams>,
    ValidatedJson(dto): ValidatedJson<CreateStudentDto>,
) -> Result<(StatusCode, Json<Student>), AppError> {
    let student =
        StudentService::create_student(state.store.as_ref(), category, dto, params.restore)
            .await?;
    Ok((StatusCode::CREATED, Json(student)))
}

#[utoipa::path(
    get,
    path = "/api/students/{id}",
    params(("id" = i64, Path, description = "Database ID")),
    responses(
        (status = 200, description = "Student details", body = Student),
        (status = 404, description = "Student not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Students"
)]
#[instrument(skip(state))]
pub async fn get_student(
    State(state): State<AppState>,
    Extension(category): Extension<StudentCategory>,
    Path(id): Path<i64>,
) -> Result<Json<Student>, AppError> {
    let student = StudentService::get_student(state.store.as_ref(), category, id).await?;
    Ok(Json(student))
}

#[utoipa::path(
    get,
    path = "/api/students/by-student-id/{studentId}",
    params(("studentId" = String, Path, description = "Assigned student ID")),
    responses(
        (status = 200, description = "Student details", body = Student),
        (status = 404, description = "Student not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Students"
)]
#[instrument(skip(state))]
pub async fn get_student_by_student_id(
    State(state): State<AppState>,
    Extension(category): Extension<StudentCategory>,
    Path(student_id): Path<String>,
) -> Result<Json<Student>, AppError> {
    let student =
        StudentService::get_student_by_student_id(state.store.as_ref(), category, &student_id)
            .await?;
    Ok(Json(student))
}

#[utoipa::path(
    get,
    path = "/api/students/by-teacher/{ustadh}",
    params(("ustadh" = String, Path, description = "Teacher name")),
    responses(
        (status = 200, description = "Students assigned to the teacher", body = Vec<Student>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Students"
)]
#[instrument(skip(state))]
pub async fn get_students_by_teacher(
    State(state): State<AppState>,
    Extension(category): Extension<StudentCategory>,
    Path(ustadh): Path<String>,
) -> Result<Json<Vec<Student>>, AppError> {
    let students =
        StudentService::get_students_by_teacher(state.store.as_ref(), category, &ustadh).await?;
    Ok(Json(students))
}

#[utoipa::path(
    get,
    path = "/api/students/by-teacher-class",
    params(TeacherClassParams),
    responses(
        (status = 200, description = "Students in the teacher's class", body = Vec<Student>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Students"
)]
#[instrument(skip(state))]
pub async fn get_students_by_teacher_class(
    State(state): State<AppState>,
    Extension(category): Extension<StudentCategory>,
    Query(params): Query<TeacherClassParams>,
) -> Result<Json<Vec<Student>>, AppError> {
    let students = StudentService::get_students_by_teacher_and_class(
        state.store.as_ref(),
        category,
        &params.ustadh,
        &params.class_teaching,
    )
    .await?;
    Ok(Json(students))
}

#[utoipa::path(
    put,
    path = "/api/students/{id}",
    params(("id" = i64, Path, description = "Database ID")),
    request_body = UpdateStudentDto,
    responses(
        (status = 200, description = "Student updated", body = Student),
        (status = 400, description = "New student ID is taken or was excluded", body = ErrorResponse),
        (status = 404, description = "Student not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Students"
)]
#[instrument(skip(state, dto))]
pub async fn update_student(
    State(state): State<AppState>,
    Extension(category): Extension<StudentCategory>,
    Path(id): Path<i64>,
    ValidatedJson(dto): ValidatedJson<UpdateStudentDto>,
) -> Result<Json<Student>, AppError> {
    let student = StudentService::update_student(state.store.as_ref(), category, id, dto).await?;
    Ok(Json(student))
}

#[utoipa::path(
    delete,
    path = "/api/students/{id}",
    params(("id" = i64, Path, description = "Database ID")),
    responses(
        (status = 200, description = "Student deleted", body = MessageResponse),
        (status = 404, description = "Student not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Students"
)]
#[instrument(skip(state))]
pub async fn delete_student(
    State(state): State<AppState>,
    Extension(category): Extension<StudentCategory>,
    Path(id): Path<i64>,
) -> Result<Json<MessageResponse>, AppError> {
    StudentService::delete_student(state.store.as_ref(), category, id).await?;
    Ok(Json(MessageResponse::new(format!(
        "{} deleted successfully",
        category.label()
    ))))
}

#[utoipa::path(
    delete,
    path = "/api/students/by-teacher/{ustadh}",
    params(("ustadh" = String, Path, description = "Teacher name")),
    responses(
        (status = 200, description = "All of the teacher's students deleted", body = MessageResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Students"
)]
#[instrument(skip(state))]
pub async fn delete_students_by_teacher(
    State(state): State<AppState>,
    Extension(category): Extension<StudentCategory>,
    Path(ustadh): Path<String>,
) -> Result<Json<MessageResponse>, AppError> {
    StudentService::delete_students_by_teacher(state.store.as_ref(), category, &ustadh).await?;
    Ok(Json(MessageResponse::new(format!(
        "All {} for teacher {} deleted successfully",
        category.collective(),
        ustadh
    ))))
}

#[utoipa::path(
    get,
    path = "/api/students/count-by-teacher/{ustadh}",
    params(("ustadh" = String, Path, description = "Teacher name")),
    responses(
        (status = 200, description = "Number of students assigned to the teacher", body = i64),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Students"
)]
#[instrument(skip(state))]
pub async fn count_students_by_teacher(
    State(state): State<AppState>,
    Extension(category): Extension<StudentCategory>,
    Path(ustadh): Path<String>,
) -> Result<Json<i64>, AppError> {
    let count =
        StudentService::count_students_by_teacher(state.store.as_ref(), category, &ustadh).await?;
    Ok(Json(count))
}

#[utoipa::path(
    put,
    path = "/api/students/update-class",
    params(UpdateClassParams),
    responses(
        (status = 200, description = "Class reassigned for the teacher's students", body = MessageResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Students"
)]
#[instrument(skip(state))]
pub async fn update_students_class(
    State(state): State<AppState>,
    Extension(category): Extension<StudentCategory>,
    Query(params): Query<UpdateClassParams>,
) -> Result<Json<MessageResponse>, AppError> {
    StudentService::update_students_class(
        state.store.as_ref(),
        category,
        &params.ustadh,
        &params.old_class_teaching,
        &params.new_class_teaching,
    )
    .await?;
    Ok(Json(MessageResponse::new(
        "All students updated to new class successfully",
    )))
}

#[utoipa::path(
    get,
    path = "/api/students/search",
    params(SearchParams),
    responses(
        (status = 200, description = "Students matching by name or student ID", body = Vec<Student>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Students"
)]
#[instrument(skip(state))]
pub async fn search_students(
    State(state): State<AppState>,
    Extension(category): Extension<StudentCategory>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<Student>>, AppError> {
    let students =
        StudentService::search_students(state.store.as_ref(), category, &params.q).await?;
    Ok(Json(students))
}

#[utoipa::path(
    post,
    path = "/api/students/transfer/{id}",
    params(("id" = i64, Path, description = "Database ID")),
    request_body = TransferStudentDto,
    responses(
        (status = 200, description = "Student reassigned to the new teacher/class", body = Student),
        (status = 400, description = "Required transfer fields missing or blank", body = ErrorResponse),
        (status = 404, description = "Student not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Students"
)]
#[instrument(skip(state, dto))]
pub async fn transfer_student(
    State(state): State<AppState>,
    Extension(category): Extension<StudentCategory>,
    Path(id): Path<i64>,
    Json(dto): Json<TransferStudentDto>,
) -> Result<Json<Student>, AppError> {
    let new_ustadh = dto.new_ustadh.as_deref().map(str::trim).unwrap_or_default();
    let new_class_teaching = dto
        .new_class_teaching
        .as_deref()
        .map(str::trim)
        .unwrap_or_default();
    let transferred_by = dto
        .transferred_by
        .as_deref()
        .map(str::trim)
        .unwrap_or_default();

    if new_ustadh.is_empty() || new_class_teaching.is_empty() || transferred_by.is_empty() {
        return Err(AppError::bad_request(anyhow!(
            "Missing or empty required fields: newUstadh, newClassTeaching, transferredBy"
        )));
    }

    let student = StudentService::transfer_student(
        state.store.as_ref(),
        category,
        id,
        new_ustadh,
        new_class_teaching,
    )
    .await?;
    Ok(Json(student))
}
