//! User service - registration and profile lifecycle.
//!
//! Enforces the rules the aggregate cannot see on its own (email
//! uniqueness across users) and orders every change as validate-then-write.

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use common::{AppError, AppResult};
use domain::{normalize_email, CreateUser, UpdateUser, User, EMAIL_TAKEN_MESSAGE};

use crate::repository::UserRepository;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// User service trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserService: Send + Sync {
    /// Register a new user; `Conflict` if the email is taken.
    async fn create_user(&self, request: CreateUser) -> AppResult<User>;

    /// Get user by ID
    async fn get_user(&self, id: Uuid) -> AppResult<Option<User>>;

    /// List all users, newest first
    async fn list_users(&self) -> AppResult<Vec<User>>;

    /// Apply the set fields of `changes`; `None` if the user does not exist.
    async fn update_user(&self, id: Uuid, changes: UpdateUser) -> AppResult<Option<User>>;

    /// Delete user; succeeds whether or not it existed
    async fn delete_user(&self, id: Uuid) -> AppResult<()>;
}

/// Concrete implementation of UserService using repository.
///
/// The uniqueness check and the insert are two separate round trips: two
/// concurrent registrations of one email can both pass the check. The
/// store's unique index then rejects the second `save` with `Conflict`.
pub struct UserManager {
    repo: Arc<dyn UserRepository>,
}

impl UserManager {
    /// Create new user service instance with repository
    pub fn new(repo: Arc<dyn UserRepository>) -> Self {
        Self { repo }
    }

    async fn ensure_email_free(&self, email: &str, owner: Option<Uuid>) -> AppResult<()> {
        match self.repo.find_by_email(email).await? {
            Some(existing) if Some(existing.id()) != owner => {
                Err(AppError::conflict(EMAIL_TAKEN_MESSAGE))
            }
            _ => Ok(()),
        }
    }
}

#[async_trait]
impl UserService for UserManager {
    async fn create_user(&self, request: CreateUser) -> AppResult<User> {
        let email = normalize_email(&request.email);
        if self.repo.find_by_email(&email).await?.is_some() {
            tracing::debug!(email = %email, "Registration rejected: email taken");
            return Err(AppError::conflict(EMAIL_TAKEN_MESSAGE));
        }

        let user = User::create(
            &request.name,
            &email,
            request.phone.as_deref(),
            &request.password,
        )?;
        self.repo.save(&user).await?;

        tracing::info!(user_id = %user.id(), "User created");
        Ok(user)
    }

    async fn get_user(&self, id: Uuid) -> AppResult<Option<User>> {
        self.repo.find_by_id(id).await
    }

    async fn list_users(&self) -> AppResult<Vec<User>> {
        self.repo.find_all().await
    }

    async fn update_user(&self, id: Uuid, changes: UpdateUser) -> AppResult<Option<User>> {
        let Some(mut user) = self.repo.find_by_id(id).await? else {
            return Ok(None);
        };
        if changes.is_empty() {
            return Ok(Some(user));
        }

        // Mutate a loaded copy; nothing is written unless every setter passes.
        if let Some(name) = changes.name.as_deref() {
            user.set_name(name)?;
        }
        if let Some(email) = changes.email.as_deref() {
            user.set_email(email)?;
            self.ensure_email_free(user.email(), Some(user.id())).await?;
        }
        if let Some(phone) = changes.phone.as_deref() {
            user.set_phone(Some(phone));
        }
        if let Some(password) = changes.password.as_deref() {
            user.change_password(password)?;
        }

        self.repo.update(&user).await?;

        tracing::info!(user_id = %user.id(), "User updated");
        Ok(Some(user))
    }

    async fn delete_user(&self, id: Uuid) -> AppResult<()> {
        self.repo.delete(id).await?;
        tracing::info!(user_id = %id, "User deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockall::predicate::eq;

    use crate::repository::MockUserRepository;

    fn existing_user() -> User {
        User::create("Alice", "alice@example.com", Some("555-0100"), "s3cret").unwrap()
    }

    fn create_request(email: &str) -> CreateUser {
        CreateUser {
            name: "Alice".to_string(),
            email: email.to_string(),
            phone: None,
            password: "s3cret".to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_user_checks_normalized_email() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email()
            .with(eq("alice@example.com"))
            .times(1)
            .returning(|_| Ok(None));
        repo.expect_save().times(1).returning(|_| Ok(()));

        let service = UserManager::new(Arc::new(repo));
        let user = service
            .create_user(create_request("  ALICE@Example.com "))
            .await
            .unwrap();

        assert_eq!(user.email(), "alice@example.com");
        assert!(user.verify_password("s3cret"));
    }

    #[tokio::test]
    async fn test_create_user_conflict_skips_save() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email()
            .returning(|_| Ok(Some(existing_user())));
        repo.expect_save().never();

        let service = UserManager::new(Arc::new(repo));
        let result = service.create_user(create_request("alice@example.com")).await;

        assert!(matches!(result, Err(AppError::Conflict(msg)) if msg == EMAIL_TAKEN_MESSAGE));
    }

    #[tokio::test]
    async fn test_create_user_propagates_storage_errors() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email()
            .returning(|_| Err(AppError::internal("connection reset")));

        let service = UserManager::new(Arc::new(repo));
        let result = service.create_user(create_request("alice@example.com")).await;

        assert!(matches!(result, Err(AppError::Internal(_))));
    }

    #[tokio::test]
    async fn test_create_user_blank_name_is_validation_error() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email().returning(|_| Ok(None));
        repo.expect_save().never();

        let service = UserManager::new(Arc::new(repo));
        let mut request = create_request("alice@example.com");
        request.name = "  ".to_string();

        let result = service.create_user(request).await;
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_get_user_not_found() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_id().returning(|_| Ok(None));

        let service = UserManager::new(Arc::new(repo));
        let result = service.get_user(Uuid::new_v4()).await.unwrap();

        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_update_missing_user_returns_none() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_id().returning(|_| Ok(None));
        repo.expect_update().never();

        let service = UserManager::new(Arc::new(repo));
        let changes = UpdateUser {
            name: Some("Bob".to_string()),
            ..Default::default()
        };

        let result = service.update_user(Uuid::new_v4(), changes).await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_update_invalid_email_never_writes() {
        let user = existing_user();
        let id = user.id();

        let mut repo = MockUserRepository::new();
        repo.expect_find_by_id()
            .with(eq(id))
            .returning(move |_| Ok(Some(user.clone())));
        repo.expect_update().never();

        let service = UserManager::new(Arc::new(repo));
        let changes = UpdateUser {
            name: Some("Valid Name".to_string()),
            email: Some("not-an-email".to_string()),
            ..Default::default()
        };

        let result = service.update_user(id, changes).await;
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_update_email_taken_by_other_user() {
        let user = existing_user();
        let id = user.id();

        let mut repo = MockUserRepository::new();
        repo.expect_find_by_id()
            .returning(move |_| Ok(Some(user.clone())));
        repo.expect_find_by_email()
            .with(eq("bob@example.com"))
            .returning(|_| {
                Ok(Some(
                    User::create("Bob", "bob@example.com", None, "pw").unwrap(),
                ))
            });
        repo.expect_update().never();

        let service = UserManager::new(Arc::new(repo));
        let changes = UpdateUser {
            email: Some("Bob@Example.com".to_string()),
            ..Default::default()
        };

        let result = service.update_user(id, changes).await;
        assert!(matches!(result, Err(AppError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_update_own_email_case_change_is_allowed() {
        let user = existing_user();
        let id = user.id();
        let same = user.clone();

        let mut repo = MockUserRepository::new();
        repo.expect_find_by_id()
            .returning(move |_| Ok(Some(user.clone())));
        repo.expect_find_by_email()
            .returning(move |_| Ok(Some(same.clone())));
        repo.expect_update().times(1).returning(|_| Ok(()));

        let service = UserManager::new(Arc::new(repo));
        let changes = UpdateUser {
            email: Some("ALICE@example.com".to_string()),
            ..Default::default()
        };

        let updated = service.update_user(id, changes).await.unwrap().unwrap();
        assert_eq!(updated.email(), "alice@example.com");
    }

    #[tokio::test]
    async fn test_update_with_no_changes_skips_write() {
        let user = existing_user();
        let id = user.id();

        let mut repo = MockUserRepository::new();
        repo.expect_find_by_id()
            .returning(move |_| Ok(Some(user.clone())));
        repo.expect_update().never();

        let service = UserManager::new(Arc::new(repo));
        let result = service.update_user(id, UpdateUser::default()).await.unwrap();

        assert_eq!(result.unwrap().id(), id);
    }

    #[tokio::test]
    async fn test_delete_user_passthrough() {
        let id = Uuid::new_v4();

        let mut repo = MockUserRepository::new();
        repo.expect_delete().with(eq(id)).times(1).returning(|_| Ok(()));

        let service = UserManager::new(Arc::new(repo));
        service.delete_user(id).await.unwrap();
    }
}
