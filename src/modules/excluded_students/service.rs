use crate::{
    modules::excluded_students::model::{ExcludedStudent, ExclusionStatistics, NewExcludedStudent},
    utils::errors::AppError,
};
use anyhow::anyhow;
use maktab_core::{Clock, month_bounds};
use maktab_models::StudentCategory;
use maktab_store::{Store, StoreError};
use tracing::instrument;

fn not_found(id: i64) -> AppError {
    AppError::not_found(anyhow!("Excluded student not found with id: {}", id))
}

fn already_excluded(student_id: &str) -> AppError {
    AppError::conflict(anyhow!(
        "Cannot exclude student: ID '{}' is already excluded (this ID is permanently blocked and cannot be reused or re-excluded)",
        student_id
    ))
}

pub struct ExcludedStudentService;

impl ExcludedStudentService {
    #[instrument(skip(store))]
    pub async fn get_all_excluded_students(
        store: &dyn Store,
    ) -> Result<Vec<ExcludedStudent>, AppError> {
        Ok(store.list_excluded().await?)
    }

    #[instrument(skip(store))]
    pub async fn get_excluded_student(
        store: &dyn Store,
        id: i64,
    ) -> Result<ExcludedStudent, AppError> {
        store.find_excluded(id).await?.ok_or_else(|| not_found(id))
    }

    /// Moves an active general-register student onto the exclusion ledger.
    ///
    /// The student is loaded by primary key, snapshotted with today's date,
    /// and the insert + delete run in one store transaction. An ID already
    /// on the ledger is a conflict whatever its age; the ledger's unique
    /// constraint backstops concurrent exclusions.
    #[instrument(skip(store, clock, excluded_by, reason, exclusion_type, additional_notes))]
    pub async fn exclude_student(
        store: &dyn Store,
        clock: &dyn Clock,
        id: i64,
        excluded_by: String,
        reason: String,
        exclusion_type: String,
        additional_notes: Option<String>,
    ) -> Result<ExcludedStudent, AppError> {
        let student = store
            .find_student(StudentCategory::General, id)
            .await?
            .ok_or_else(|| AppError::not_found(anyhow!("Student not found with id: {}", id)))?;

        if store.excluded_id_exists(&student.student_id).await? {
            return Err(already_excluded(&student.student_id));
        }

        let snapshot = NewExcludedStudent::snapshot(
            &student,
            excluded_by,
            reason,
            exclusion_type,
            additional_notes,
            clock.today(),
        );

        match store.exclude_student(&snapshot, student.id).await {
            Ok(excluded) => Ok(excluded),
            Err(StoreError::UniqueViolation) => Err(already_excluded(&student.student_id)),
            Err(e) => Err(e.into()),
        }
    }

    #[instrument(skip(store))]
    pub async fn get_excluded_students_by_teacher(
        store: &dyn Store,
        ustadh: &str,
    ) -> Result<Vec<ExcludedStudent>, AppError> {
        Ok(store.excluded_by_ustadh(ustadh).await?)
    }

    #[instrument(skip(store))]
    pub async fn get_excluded_students_by_teacher_and_class(
        store: &dyn Store,
        ustadh: &str,
        class_teaching: &str,
    ) -> Result<Vec<ExcludedStudent>, AppError> {
        Ok(store
            .excluded_by_ustadh_and_class(ustadh, class_teaching)
            .await?)
    }

    /// Ledger rows excluded during the current calendar month.
    #[instrument(skip(store, clock))]
    pub async fn get_excluded_students_this_month(
        store: &dyn Store,
        clock: &dyn Clock,
    ) -> Result<Vec<ExcludedStudent>, AppError> {
        let (start, end) = month_bounds(clock.today());
        Ok(store.excluded_between(start, end).await?)
    }

    #[instrument(skip(store))]
    pub async fn search_excluded_students(
        store: &dyn Store,
        term: &str,
    ) -> Result<Vec<ExcludedStudent>, AppError> {
        Ok(store.search_excluded(term).await?)
    }

    /// Permanently removes a ledger row. After this the ID is reusable
    /// without even the `restore` bypass.
    #[instrument(skip(store))]
    pub async fn delete_excluded_student(store: &dyn Store, id: i64) -> Result<(), AppError> {
        if !store.delete_excluded(id).await? {
            return Err(not_found(id));
        }
        Ok(())
    }

    #[instrument(skip(store, clock))]
    pub async fn get_statistics(
        store: &dyn Store,
        clock: &dyn Clock,
    ) -> Result<ExclusionStatistics, AppError> {
        let (start, end) = month_bounds(clock.today());
        Ok(store.exclusion_statistics(start, end).await?)
    }
}
