pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;

use crate::analysis::handlers as analysis_handlers;
use crate::session::handlers as session_handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let body_limit = match state.config.max_upload_bytes {
        Some(limit) => DefaultBodyLimit::max(limit),
        None => DefaultBodyLimit::disable(),
    };

    let api = Router::new()
        .route("/api/v1/analyze", post(analysis_handlers::handle_analyze))
        .route("/api/v1/schema", get(analysis_handlers::handle_schema))
        .layer(CorsLayer::permissive());

    Router::new()
        .route("/health", get(health::health_handler))
        // Browser UI
        .route("/", get(session_handlers::handle_new_session))
        .route("/sessions/:id", get(session_handlers::handle_session_page))
        .route(
            "/sessions/:id/file",
            post(session_handlers::handle_select_file),
        )
        .route(
            "/sessions/:id/analyze",
            post(session_handlers::handle_analyze),
        )
        .merge(api)
        .layer(body_limit)
        .with_state(state)
}
