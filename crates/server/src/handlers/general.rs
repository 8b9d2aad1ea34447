//! # General Route Handlers

use super::AppState;
use crate::types::HealthResponse;
use axum::{extract::State, Json};

/// The handler for the root (`/`) endpoint.
pub async fn root() -> &'static str {
    "Repostly server is running."
}

/// The handler for the health check (`/health`) endpoint.
pub async fn health_check(State(app_state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        message: "Repostly API is running".to_string(),
        generation_service_configured: app_state.insight.is_configured(),
    })
}
