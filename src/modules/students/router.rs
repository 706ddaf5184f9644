use crate::modules::students::controller::{
    count_students_by_teacher, create_student, delete_student, delete_students_by_teacher,
    get_student, get_student_by_student_id, get_students, get_students_by_teacher,
    get_students_by_teacher_class, search_students, transfer_student, update_student,
    update_students_class,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post, put},
};

/// Routes shared by all three student registers. The caller layers the
/// register's [`StudentCategory`](crate::modules::students::StudentCategory)
/// extension onto the returned router.
pub fn init_students_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_student).get(get_students))
        .route("/search", get(search_students))
        .route("/update-class", put(update_students_class))
        .route("/by-student-id/{studentId}", get(get_student_by_student_id))
        .route(
            "/by-teacher/{ustadh}",
            get(get_students_by_teacher).delete(delete_students_by_teacher),
        )
        .route("/by-teacher-class", get(get_students_by_teacher_class))
        .route("/count-by-teacher/{ustadh}", get(count_students_by_teacher))
        .route(
            "/{id}",
            get(get_student).put(update_student).delete(delete_student),
        )
}

/// The general register additionally exposes the transfer operation.
pub fn init_general_students_router() -> Router<AppState> {
    init_students_router().route("/transfer/{id}", post(transfer_student))
}
