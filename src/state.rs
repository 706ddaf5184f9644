use std::sync::Arc;

use maktab_config::{CorsConfig, SweepConfig, init_db_pool};
use maktab_core::{Clock, SystemClock};
use maktab_store::{PgStore, Store};

/// Shared application state handed to every handler.
///
/// The store and clock are behind trait objects so integration tests can swap
/// in an in-memory store and a fixed clock.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Store>,
    pub clock: Arc<dyn Clock>,
    pub cors_config: CorsConfig,
    pub sweep_config: SweepConfig,
}

pub async fn init_app_state() -> AppState {
    AppState {
        store: Arc::new(PgStore::new(init_db_pool().await)),
        clock: Arc::new(SystemClock),
        cors_config: CorsConfig::from_env(),
        sweep_config: SweepConfig::from_env(),
    }
}
