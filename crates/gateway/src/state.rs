//! Application state for dependency injection.

use std::sync::Arc;

use auth_service_lib::AuthService;
use user_service_lib::service::UserService;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserService>,
    pub auth: Arc<dyn AuthService>,
}

impl AppState {
    /// Create new app state.
    pub fn new(users: Arc<dyn UserService>, auth: Arc<dyn AuthService>) -> Self {
        Self { users, auth }
    }
}
