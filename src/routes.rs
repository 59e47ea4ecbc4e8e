// src/routes.rs

use axum::{
    Router,
    http::Method,
    routing::get,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{handlers::questions, state::AppState};

/// Assembles the main application router.
///
/// * Mounts the question CRUD routes.
/// * Applies global middleware (Trace, CORS).
/// * Injects global state (repository + config).
pub fn create_router(state: AppState) -> Router {
    let origins = [
        "http://localhost:3000".parse().unwrap(),
        "http://127.0.0.1:3000".parse().unwrap(),
    ];

    let cors = CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([axum::http::header::CONTENT_TYPE]);

    let question_routes = Router::new()
        .route("/", get(questions::index).post(questions::store))
        .route(
            "/{id}",
            get(questions::show)
                .put(questions::update)
                .delete(questions::destroy),
        );

    Router::new()
        .nest("/questions", question_routes)
        // Global Middleware (applied from outside in)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
