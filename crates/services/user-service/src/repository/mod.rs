//! Repository layer for data access.
//!
//! [`UserRepository`] is the port; [`UserStore`] (SeaORM) and
//! [`InMemoryUserStore`] are the engines shipped with the crate.

pub mod entities;
mod memory;
mod user_repository;
mod user_store;

pub use memory::InMemoryUserStore;
pub use user_repository::UserRepository;
pub use user_store::UserStore;

// Export mock for tests (both unit and integration)
#[cfg(any(test, feature = "test-utils"))]
pub use user_repository::MockUserRepository;
