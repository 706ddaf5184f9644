use crate::modules::teachers::controller::{
    access_teacher, create_teacher, delete_teacher, get_teacher, get_teachers, search_teachers,
    update_teacher,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// Routes shared by all three teacher registers. The caller layers the
/// register's [`TeacherCategory`](crate::modules::teachers::TeacherCategory)
/// extension onto the returned router.
pub fn init_teachers_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_teacher).get(get_teachers))
        .route("/search", get(search_teachers))
        .route("/access", post(access_teacher))
        .route(
            "/{id}",
            get(get_teacher).put(update_teacher).delete(delete_teacher),
        )
}
