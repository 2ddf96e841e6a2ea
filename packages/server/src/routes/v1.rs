use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};

use crate::config::AppConfig;
use crate::handlers;
use crate::state::AppState;

pub fn routes(config: &AppConfig) -> Router<AppState> {
    Router::new()
        .nest("/students", student_routes(config))
        .nest("/results", result_routes(config))
}

fn student_routes(config: &AppConfig) -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::student::list_students)
                .post(handlers::student::create_student)
                .fallback(handlers::method_not_allowed),
        )
        .route(
            "/{id}",
            get(handlers::student::get_student)
                .put(handlers::student::update_student)
                .fallback(handlers::method_not_allowed),
        )
        .merge(
            Router::new()
                .route(
                    "/import",
                    post(handlers::import::import_students)
                        .fallback(handlers::method_not_allowed),
                )
                .layer(upload_body_limit(config)),
        )
}

fn result_routes(config: &AppConfig) -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::result::list_results)
                .post(handlers::result::create_result)
                .fallback(handlers::method_not_allowed),
        )
        .route(
            "/{id}",
            get(handlers::result::get_result)
                .put(handlers::result::update_result)
                .delete(handlers::result::delete_result)
                .fallback(handlers::method_not_allowed),
        )
        .merge(
            Router::new()
                .route(
                    "/import",
                    post(handlers::import::import_results)
                        .fallback(handlers::method_not_allowed),
                )
                .layer(upload_body_limit(config)),
        )
}

fn upload_body_limit(config: &AppConfig) -> DefaultBodyLimit {
    DefaultBodyLimit::max(config.import.max_upload_bytes)
}
