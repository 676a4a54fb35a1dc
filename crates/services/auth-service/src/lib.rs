//! Auth Service Library
//!
//! Credential verification and stateless session tokens. The service only
//! sees users through the repository port, so any engine can back it.

pub mod config;
pub mod service;

pub use config::AuthServiceConfig;
pub use service::{AuthService, Authenticator, Claims, TokenCodec};
