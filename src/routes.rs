// src/routes.rs

use axum::{
    Router,
    http::Method,
    routing::{delete, get, post, put},
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    handlers::{comment, post as post_handlers},
    state::AppState,
};

/// Assembles the main application router.
///
/// * Merges the post and comment sub-routers under /api/v1.
/// * Applies global middleware (Trace, CORS).
/// * Injects global state (Database Pool + Config).
pub fn create_router(state: AppState) -> Router {
    let origins = [
        "http://localhost:3000".parse().unwrap(),
        "http://127.0.0.1:3000".parse().unwrap(),
    ];

    let cors = CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([axum::http::header::CONTENT_TYPE]);

    let post_routes = Router::new()
        .route("/", get(post_handlers::get_post))
        .route("/create", post(post_handlers::create_post))
        .route("/update", put(post_handlers::update_post))
        .route("/remove", delete(post_handlers::remove_post));

    let comment_routes = Router::new()
        .route("/fetch", get(comment::get_comments))
        .route("/create", post(comment::create_comment))
        .route("/update", put(comment::update_comment))
        .route("/remove", delete(comment::remove_comment))
        .route("/children", get(comment::get_child_comments));

    Router::new()
        .nest("/api/v1/post", post_routes)
        .nest("/api/v1/comment", comment_routes)
        // Global Middleware (applied from outside in)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
