//! Health check handlers.

use axum::{response::Json, routing::get, Router};
use serde::Serialize;

use crate::state::AppState;

/// Name reported by the health check.
pub const SERVICE_NAME: &str = "identity";

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub ok: bool,
    pub service: &'static str,
}

/// Create health routes.
pub fn health_routes() -> Router<AppState> {
    Router::new().route("/", get(health_check))
}

/// Liveness probe; touches no dependency.
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        ok: true,
        service: SERVICE_NAME,
    })
}
