use crate::{
    modules::teachers::model::{CreateTeacherDto, Teacher, TeacherCategory, UpdateTeacherDto},
    utils::errors::AppError,
};
use anyhow::anyhow;
use maktab_store::{Store, StoreError};
use tracing::instrument;

fn not_found(category: TeacherCategory, id: i64) -> AppError {
    AppError::not_found(anyhow!("{} not found with id: {}", category.label(), id))
}

fn name_taken(category: TeacherCategory, name: &str) -> AppError {
    AppError::bad_request(anyhow!(
        "{} with name '{}' already exists",
        category.label(),
        name
    ))
}

pub struct TeacherService;

impl TeacherService {
    #[instrument(skip(store))]
    pub async fn get_all_teachers(
        store: &dyn Store,
        category: TeacherCategory,
    ) -> Result<Vec<Teacher>, AppError> {
        Ok(store.list_teachers(category).await?)
    }

    #[instrument(skip(store))]
    pub async fn get_teacher(
        store: &dyn Store,
        category: TeacherCategory,
        id: i64,
    ) -> Result<Teacher, AppError> {
        store
            .find_teacher(category, id)
            .await?
            .ok_or_else(|| not_found(category, id))
    }

    /// Exact name + class lookup used by the access endpoint.
    #[instrument(skip(store))]
    pub async fn get_teacher_by_name_and_class(
        store: &dyn Store,
        category: TeacherCategory,
        name: &str,
        class_teaching: &str,
    ) -> Result<Teacher, AppError> {
        store
            .find_teacher_by_name_and_class(category, name, class_teaching)
            .await?
            .ok_or_else(|| {
                AppError::not_found(anyhow!(
                    "{} not found with name: {} and class: {}",
                    category.label(),
                    name,
                    class_teaching
                ))
            })
    }

    /// Creates a teacher; the name must be unique within its register. The
    /// pre-check gives the readable message, the table's unique constraint
    /// backstops concurrent creates.
    #[instrument(skip(store, dto))]
    pub async fn create_teacher(
        store: &dyn Store,
        category: TeacherCategory,
        dto: CreateTeacherDto,
    ) -> Result<Teacher, AppError> {
        if store.teacher_name_exists(category, &dto.name).await? {
            return Err(name_taken(category, &dto.name));
        }

        match store.insert_teacher(category, &dto).await {
            Ok(teacher) => Ok(teacher),
            Err(StoreError::UniqueViolation) => Err(name_taken(category, &dto.name)),
            Err(e) => Err(e.into()),
        }
    }

    #[instrument(skip(store, dto))]
    pub async fn update_teacher(
        store: &dyn Store,
        category: TeacherCategory,
        id: i64,
        dto: UpdateTeacherDto,
    ) -> Result<Teacher, AppError> {
        let current = store
            .find_teacher(category, id)
            .await?
            .ok_or_else(|| not_found(category, id))?;

        if current.name != dto.name && store.teacher_name_exists(category, &dto.name).await? {
            return Err(name_taken(category, &dto.name));
        }

        match store.update_teacher(category, id, &dto).await {
            Ok(Some(teacher)) => Ok(teacher),
            Ok(None) => Err(not_found(category, id)),
            Err(StoreError::UniqueViolation) => Err(name_taken(category, &dto.name)),
            Err(e) => Err(e.into()),
        }
    }

    #[instrument(skip(store))]
    pub async fn delete_teacher(
        store: &dyn Store,
        category: TeacherCategory,
        id: i64,
    ) -> Result<(), AppError> {
        if !store.delete_teacher(category, id).await? {
            return Err(not_found(category, id));
        }
        Ok(())
    }

    #[instrument(skip(store))]
    pub async fn search_teachers(
        store: &dyn Store,
        category: TeacherCategory,
        name: &str,
    ) -> Result<Vec<Teacher>, AppError> {
        Ok(store.search_teachers(category, name).await?)
    }
}
