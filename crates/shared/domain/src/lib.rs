//! Domain layer - the User aggregate and its value objects.
//!
//! This crate contains pure domain logic with no infrastructure dependencies.
//! Persistence and transport crates consume these types through the
//! repository port defined in `user-service`.

pub mod constants;
pub mod error;
pub mod password;
pub mod user;

pub use constants::*;
pub use error::{DomainError, DomainResult};
pub use password::Password;
pub use user::{normalize_email, CreateUser, UpdateUser, User, UserPrimitives, UserResponse};
