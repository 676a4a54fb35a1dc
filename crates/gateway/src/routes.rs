//! Route configuration.

use axum::Router;

use common::AppError;

use crate::handlers::{auth_routes, health_routes, user_routes};
use crate::state::AppState;

/// Create the main router with all routes.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .merge(health_routes())
        .merge(auth_routes())
        .merge(user_routes())
        .fallback(route_not_found)
        .with_state(state)
}

async fn route_not_found() -> AppError {
    AppError::NotFound
}
