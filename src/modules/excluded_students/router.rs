//! Route tables for the exclusion ledger.
//!
//! Two routers live here: the read/delete surface nested under
//! `/api/excluded-students`, and the single exclusion endpoint nested
//! under `/api/exclude` so the final path reads `/api/exclude/student/{id}`.

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

use super::controller::{
    delete_excluded_student, exclude_student, get_excluded_student, get_excluded_students,
    get_excluded_students_by_teacher, get_excluded_students_by_teacher_class,
    get_excluded_students_this_month, get_statistics, search_excluded_students,
};

pub fn init_excluded_students_router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_excluded_students))
        .route("/search", get(search_excluded_students))
        .route("/this-month", get(get_excluded_students_this_month))
        .route("/statistics", get(get_statistics))
        .route("/by-teacher/{ustadh}", get(get_excluded_students_by_teacher))
        .route(
            "/by-teacher-class",
            get(get_excluded_students_by_teacher_class),
        )
        .route(
            "/{id}",
            get(get_excluded_student).delete(delete_excluded_student),
        )
}

pub fn init_exclude_router() -> Router<AppState> {
    Router::new().route("/student/{id}", post(exclude_student))
}
