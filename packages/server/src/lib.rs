pub mod config;
pub mod database;
pub mod entity;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod import;
pub mod models;
pub mod repository;
pub mod routes;
pub mod state;
pub mod tabular;

#[cfg(test)]
#[path = "../tests/integration/common/xlsx.rs"]
mod test_xlsx;

use std::time::Duration;

use axum::http::{HeaderValue, Method, header};
use axum::{Json, routing::get};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable as ScalarServable};

use crate::config::CorsConfig;
use crate::state::AppState;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Marksheet API",
        version = "1.0.0",
        description = "Students, their results, and bulk spreadsheet imports"
    ),
    paths(
        handlers::student::list_students,
        handlers::student::create_student,
        handlers::student::get_student,
        handlers::student::update_student,
        handlers::result::list_results,
        handlers::result::create_result,
        handlers::result::get_result,
        handlers::result::update_result,
        handlers::result::delete_result,
        handlers::import::import_students,
        handlers::import::import_results,
    ),
    tags(
        (name = "Students", description = "Student records"),
        (name = "Results", description = "Per-subject marks"),
        (name = "Imports", description = "CSV and Excel bulk upserts"),
    ),
)]
pub struct ApiDoc;

/// Build the application router.
pub fn build_router(state: AppState) -> axum::Router {
    let api = ApiDoc::openapi();
    let cors = cors_layer(&state.config.server.cors);

    axum::Router::new()
        .nest("/api", routes::api_routes(&state.config))
        .fallback(handlers::not_found)
        .with_state(state)
        .route(
            "/api-docs/openapi.json",
            get({
                let api = api.clone();
                move || async move { Json(api) }
            }),
        )
        .merge(Scalar::with_url("/scalar", api))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

fn cors_layer(config: &CorsConfig) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::ACCEPT, header::CONTENT_TYPE])
        .max_age(Duration::from_secs(config.max_age));

    if config.allow_origins.is_empty() || config.allow_origins.iter().any(|o| o == "*") {
        cors.allow_origin(Any)
    } else {
        let origins: Vec<HeaderValue> = config
            .allow_origins
            .iter()
            .filter_map(|origin| origin.parse().ok())
            .collect();
        cors.allow_origin(origins)
    }
}
