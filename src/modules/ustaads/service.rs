use crate::{
    modules::ustaads::model::{CreateUstaadDto, UpdateUstaadDto, Ustaad},
    utils::errors::AppError,
};
use anyhow::anyhow;
use maktab_store::{Store, StoreError};
use tracing::instrument;

fn not_found(id: i64) -> AppError {
    AppError::not_found(anyhow!("Ustaad not found with id: {}", id))
}

fn name_taken(full_name: &str) -> AppError {
    AppError::bad_request(anyhow!("Ustaad with name '{}' already exists", full_name))
}

pub struct UstaadService;

impl UstaadService {
    #[instrument(skip(store))]
    pub async fn get_all_ustaads(store: &dyn Store) -> Result<Vec<Ustaad>, AppError> {
        Ok(store.list_ustaads().await?)
    }

    #[instrument(skip(store))]
    pub async fn get_ustaad(store: &dyn Store, id: i64) -> Result<Ustaad, AppError> {
        store.find_ustaad(id).await?.ok_or_else(|| not_found(id))
    }

    #[instrument(skip(store, dto))]
    pub async fn create_ustaad(
        store: &dyn Store,
        dto: CreateUstaadDto,
    ) -> Result<Ustaad, AppError> {
        if store.ustaad_name_exists(&dto.full_name).await? {
            return Err(name_taken(&dto.full_name));
        }

        match store.insert_ustaad(&dto).await {
            Ok(ustaad) => Ok(ustaad),
            Err(StoreError::UniqueViolation) => Err(name_taken(&dto.full_name)),
            Err(e) => Err(e.into()),
        }
    }

    #[instrument(skip(store, dto))]
    pub async fn update_ustaad(
        store: &dyn Store,
        id: i64,
        dto: UpdateUstaadDto,
    ) -> Result<Ustaad, AppError> {
        let current = store.find_ustaad(id).await?.ok_or_else(|| not_found(id))?;

        if current.full_name != dto.full_name && store.ustaad_name_exists(&dto.full_name).await? {
            return Err(name_taken(&dto.full_name));
        }

        match store.update_ustaad(id, &dto).await {
            Ok(Some(ustaad)) => Ok(ustaad),
            Ok(None) => Err(not_found(id)),
            Err(StoreError::UniqueViolation) => Err(name_taken(&dto.full_name)),
            Err(e) => Err(e.into()),
        }
    }

    #[instrument(skip(store))]
    pub async fn delete_ustaad(store: &dyn Store, id: i64) -> Result<(), AppError> {
        if !store.delete_ustaad(id).await? {
            return Err(not_found(id));
        }
        Ok(())
    }

    #[instrument(skip(store))]
    pub async fn search_ustaads(store: &dyn Store, name: &str) -> Result<Vec<Ustaad>, AppError> {
        Ok(store.search_ustaads(name).await?)
    }
}
