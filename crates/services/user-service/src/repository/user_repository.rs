//! Repository port for the User aggregate.

use async_trait::async_trait;
use uuid::Uuid;

use common::AppResult;
use domain::User;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Storage-agnostic persistence contract for users.
///
/// Services depend on this trait only; engines are chosen at wiring time.
/// Implementations must order writes and reads of the same id issued by
/// one caller (no stale read after an own write).
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Persist a brand-new user.
    ///
    /// Fails with `Conflict` when the id or the email already exists.
    async fn save(&self, user: &User) -> AppResult<()>;

    /// Find a user by id.
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>>;

    /// Find a user by email, compared case-insensitively.
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;

    /// All users, newest `created_at` first.
    async fn find_all(&self) -> AppResult<Vec<User>>;

    /// Overwrite name, email, phone and password hash of the row with the
    /// user's id. A missing row is not an error.
    async fn update(&self, user: &User) -> AppResult<()>;

    /// Remove a user. Deleting a missing id is not an error.
    async fn delete(&self, id: Uuid) -> AppResult<()>;
}
