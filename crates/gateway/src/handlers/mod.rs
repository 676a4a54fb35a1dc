//! HTTP handlers.

mod auth_handler;
mod health_handler;
mod user_handler;

pub use auth_handler::{auth_routes, login, LoginRequest, TokenResponse};
pub use health_handler::{health_check, health_routes, HealthResponse};
pub use user_handler::{
    create_user, delete_user, get_user, list_users, update_user, user_routes, DeleteResponse,
};
