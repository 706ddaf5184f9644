//! Admission checks for student registration and natural-key changes.
//!
//! The guard only reads; the caller performs the insert or update after it
//! passes. Checks run in a fixed order so the first violation reported is
//! stable: own register by ID, then the excluded ledger (general register
//! only), then the case-insensitive (name, ID) pair.
//!
//! `restore=true` skips everything. That is the re-admission path for a
//! student whose exclusion lapsed; the server does not verify that the
//! retention window actually passed.

use anyhow::anyhow;
use maktab_models::{CreateStudentDto, Student, StudentCategory, UpdateStudentDto};
use maktab_store::Store;

use crate::utils::errors::AppError;

fn id_taken(category: StudentCategory, student_id: &str) -> AppError {
    match category {
        StudentCategory::General => AppError::bad_request(anyhow!(
            "Student with ID '{}' already exists in active students",
            student_id
        )),
        _ => AppError::bad_request(anyhow!(
            "{} with ID '{}' already exists",
            category.label(),
            student_id
        )),
    }
}

/// Runs the create-time checks for `dto` against `category`'s register.
///
/// The ledger check is unconditional: even an exclusion old enough to pass
/// the duplicate-check endpoint still blocks a plain create. Re-admission
/// after the window lapses goes through `restore=true`.
pub async fn check_create(
    store: &dyn Store,
    category: StudentCategory,
    dto: &CreateStudentDto,
    restore: bool,
) -> Result<(), AppError> {
    if restore {
        return Ok(());
    }

    if store.student_id_exists(category, &dto.student_id).await? {
        return Err(id_taken(category, &dto.student_id));
    }

    if category == StudentCategory::General && store.excluded_id_exists(&dto.student_id).await? {
        return Err(AppError::bad_request(anyhow!(
            "Student ID '{}' was previously excluded and cannot be reused (permanently blocked)",
            dto.student_id
        )));
    }

    if store
        .student_pair_exists(category, &dto.name, &dto.student_id)
        .await?
    {
        return Err(AppError::bad_request(anyhow!(
            "{} '{}' with ID '{}' already exists",
            category.label(),
            dto.name,
            dto.student_id
        )));
    }

    Ok(())
}

/// Re-runs the ID checks when an update changes the student's natural key.
/// An unchanged ID passes without touching the store.
pub async fn check_update(
    store: &dyn Store,
    category: StudentCategory,
    current: &Student,
    dto: &UpdateStudentDto,
) -> Result<(), AppError> {
    if dto.student_id == current.student_id {
        return Ok(());
    }

    if store.student_id_exists(category, &dto.student_id).await? {
        return Err(id_taken(category, &dto.student_id));
    }

    if category == StudentCategory::General && store.excluded_id_exists(&dto.student_id).await? {
        return Err(AppError::bad_request(anyhow!(
            "Cannot change to ID '{}' - it was previously excluded",
            dto.student_id
        )));
    }

    Ok(())
}
