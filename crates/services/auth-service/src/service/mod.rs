//! Service layer for authentication.

mod auth_service;
mod token;

pub use auth_service::{AuthService, Authenticator};
pub use token::{Claims, TokenCodec};

#[cfg(any(test, feature = "test-utils"))]
pub use auth_service::MockAuthService;
