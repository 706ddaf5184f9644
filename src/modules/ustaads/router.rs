use crate::modules::ustaads::controller::{
    create_ustaad, delete_ustaad, get_ustaad, get_ustaads, search_ustaads, update_ustaad,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

pub fn init_ustaads_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_ustaad).get(get_ustaads))
        .route("/search", get(search_ustaads))
        .route(
            "/{id}",
            get(get_ustaad).put(update_ustaad).delete(delete_ustaad),
        )
}
