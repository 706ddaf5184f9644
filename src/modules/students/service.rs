use crate::{
    modules::students::guard,
    modules::students::model::{CreateStudentDto, Student, StudentCategory, UpdateStudentDto},
    utils::errors::AppError,
};
use anyhow::anyhow;
use maktab_store::Store;
use tracing::instrument;

fn not_found(category: StudentCategory, id: i64) -> AppError {
    AppError::not_found(anyhow!("{} not found with id: {}", category.label(), id))
}

pub struct StudentService;

impl StudentService {
    #[instrument(skip(store))]
    pub async fn get_all_students(
        store: &dyn Store,
        category: StudentCategory,
    ) -> Result<Vec<Student>, AppError> {
        Ok(store.list_students(category).await?)
    }

    #[instrument(skip(store))]
    pub async fn get_student(
        store: &dyn Store,
        category: StudentCategory,
        id: i64,
    ) -> Result<Student, AppError> {
        store
            .find_student(category, id)
            .await?
            .ok_or_else(|| not_found(category, id))
    }

    #[instrument(skip(store))]
    pub async fn get_student_by_student_id(
        store: &dyn Store,
        category: StudentCategory,
        student_id: &str,
    ) -> Result<Student, AppError> {
        store
            .find_student_by_student_id(category, student_id)
            .await?
            .ok_or_else(|| {
                AppError::not_found(anyhow!(
                    "{} not found with student ID: {}",
                    category.label(),
                    student_id
                ))
            })
    }

    #[instrument(skip(store))]
    pub async fn get_students_by_teacher(
        store: &dyn Store,
        category: StudentCategory,
        ustadh: &str,
    ) -> Result<Vec<Student>, AppError> {
        Ok(store.students_by_ustadh(category, ustadh).await?)
    }

    #[instrument(skip(store))]
    pub async fn get_students_by_teacher_and_class(
        store: &dyn Store,
        category: StudentCategory,
        ustadh: &str,
        class_teaching: &str,
    ) -> Result<Vec<Student>, AppError> {
        Ok(store
            .students_by_ustadh_and_class(category, ustadh, class_teaching)
            .await?)
    }

    /// Registers a new student after the identity guard passes (or is
    /// bypassed with `restore`).
    #[instrument(skip(store, dto))]
    pub async fn create_student(
        store: &dyn Store,
        category: StudentCategory,
        dto: CreateStudentDto,
        restore: bool,
    ) -> Result<Student, AppError> {
        guard::check_create(store, category, &dto, restore).await?;
        Ok(store.insert_student(category, &dto).await?)
    }

    /// Full-replacement update; changing `student_id` re-runs the guard
    /// against the new value.
    #[instrument(skip(store, dto))]
    pub async fn update_student(
        store: &dyn Store,
        category: StudentCategory,
        id: i64,
        dto: UpdateStudentDto,
    ) -> Result<Student, AppError> {
        let current = store
            .find_student(category, id)
            .await?
            .ok_or_else(|| not_found(category, id))?;

        guard::check_update(store, category, &current, &dto).await?;

        store
            .update_student(category, id, &dto)
            .await?
            .ok_or_else(|| not_found(category, id))
    }

    /// Reassigns a student to another teacher and class. Only the pair is
    /// rewritten; who requested the transfer is not persisted.
    #[instrument(skip(store))]
    pub async fn transfer_student(
        store: &dyn Store,
        category: StudentCategory,
        id: i64,
        new_ustadh: &str,
        new_class_teaching: &str,
    ) -> Result<Student, AppError> {
        store
            .transfer_student(category, id, new_ustadh, new_class_teaching)
            .await?
            .ok_or_else(|| not_found(category, id))
    }

    #[instrument(skip(store))]
    pub async fn delete_student(
        store: &dyn Store,
        category: StudentCategory,
        id: i64,
    ) -> Result<(), AppError> {
        if !store.delete_student(category, id).await? {
            return Err(not_found(category, id));
        }
        Ok(())
    }

    #[instrument(skip(store))]
    pub async fn delete_students_by_teacher(
        store: &dyn Store,
        category: StudentCategory,
        ustadh: &str,
    ) -> Result<u64, AppError> {
        Ok(store.delete_students_by_ustadh(category, ustadh).await?)
    }

    #[instrument(skip(store))]
    pub async fn count_students_by_teacher(
        store: &dyn Store,
        category: StudentCategory,
        ustadh: &str,
    ) -> Result<i64, AppError> {
        Ok(store.count_students_by_ustadh(category, ustadh).await?)
    }

    /// Moves every student of a teacher from one class to another.
    #[instrument(skip(store))]
    pub async fn update_students_class(
        store: &dyn Store,
        category: StudentCategory,
        ustadh: &str,
        old_class_teaching: &str,
        new_class_teaching: &str,
    ) -> Result<u64, AppError> {
        Ok(store
            .update_class_for_ustadh(category, ustadh, old_class_teaching, new_class_teaching)
            .await?)
    }

    #[instrument(skip(store))]
    pub async fn search_students(
        store: &dyn Store,
        category: StudentCategory,
        term: &str,
    ) -> Result<Vec<Student>, AppError> {
        Ok(store.search_students(category, term).await?)
    }
}
