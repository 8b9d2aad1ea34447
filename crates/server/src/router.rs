use super::{handlers, state::AppState};
use axum::extract::DefaultBodyLimit;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

/// Creates the Axum router with all the application routes.
pub fn create_router(app_state: AppState) -> Router {
    let max_body_bytes = app_state.config.max_body_bytes;
    Router::new()
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health_check))
        .route(
            "/analyze",
            post(handlers::analyze_handler).layer(DefaultBodyLimit::max(max_body_bytes)),
        )
        .with_state(app_state)
        .layer(TraceLayer::new_for_http())
}
