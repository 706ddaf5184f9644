use crate::docs::ApiDoc;
use crate::logging::logging_middleware;
use crate::modules::duplicate_check::router::init_duplicate_check_router;
use crate::modules::excluded_students::router::{
    init_exclude_router, init_excluded_students_router,
};
use crate::modules::students::router::{init_general_students_router, init_students_router};
use crate::modules::teachers::router::init_teachers_router;
use crate::modules::ustaads::router::init_ustaads_router;
use crate::state::AppState;
use axum::http::{HeaderValue, Method};
use axum::{Extension, Router, middleware};
use maktab_models::{StudentCategory, TeacherCategory};
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable as _};
use utoipa_swagger_ui::SwaggerUi;

/// Builds the full application router.
///
/// The three student registers (and the three teacher registers) share one
/// handler set; each nest injects its category as an extension so the
/// handlers know which physical table they serve. Only the general student
/// register carries the transfer route.
pub fn init_router(state: AppState) -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(Scalar::with_url("/scalar", ApiDoc::openapi()))
        .nest(
            "/api",
            Router::new()
                .nest(
                    "/students",
                    init_general_students_router().layer(Extension(StudentCategory::General)),
                )
                .nest(
                    "/adult-students",
                    init_students_router().layer(Extension(StudentCategory::Adult)),
                )
                .nest(
                    "/men-students",
                    init_students_router().layer(Extension(StudentCategory::Men)),
                )
                .nest(
                    "/teachers",
                    init_teachers_router().layer(Extension(TeacherCategory::General)),
                )
                .nest(
                    "/adult-teachers",
                    init_teachers_router().layer(Extension(TeacherCategory::Adult)),
                )
                .nest(
                    "/men-teachers",
                    init_teachers_router().layer(Extension(TeacherCategory::Men)),
                )
                .nest("/ustaads", init_ustaads_router())
                .nest("/excluded-students", init_excluded_students_router())
                .nest("/exclude", init_exclude_router())
                .nest("/check-duplicate", init_duplicate_check_router()),
        )
        .with_state(state.clone())
        .layer({
            let allowed_origins: Vec<HeaderValue> = state
                .cors_config
                .allowed_origins
                .iter()
                .filter_map(|origin| origin.parse().ok())
                .collect();

            CorsLayer::new()
                .allow_origin(allowed_origins)
                .allow_methods([
                    Method::GET,
                    Method::POST,
                    Method::PUT,
                    Method::PATCH,
                    Method::DELETE,
                    Method::OPTIONS,
                ])
                .allow_headers([
                    axum::http::header::AUTHORIZATION,
                    axum::http::header::CONTENT_TYPE,
                    axum::http::header::ACCEPT,
                ])
                .allow_credentials(true)
        })
        .layer(middleware::from_fn(logging_middleware))
}
