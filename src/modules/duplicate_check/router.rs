//! Route table for the duplicate probes, nested under `/api/check-duplicate`.

use axum::{Router, routing::get};

use crate::state::AppState;

use super::controller::{check_name_duplicate, check_student_duplicate};

pub fn init_duplicate_check_router() -> Router<AppState> {
    Router::new()
        .route("/student/{studentId}", get(check_student_duplicate))
        .route("/name", get(check_name_duplicate))
}
