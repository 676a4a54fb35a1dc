//! Authentication service - Handles credential checks and session tokens.
//!
//! Authentication failures are `None`, never errors, and look the same
//! whether the email is unknown or the password is wrong.

use async_trait::async_trait;
use chrono::Utc;
use once_cell::sync::Lazy;
use std::sync::Arc;
use uuid::Uuid;

use common::{AppError, AppResult};
use domain::{normalize_email, Password};
use user_service_lib::repository::UserRepository;

use super::token::{Claims, TokenCodec};
use crate::config::AuthServiceConfig;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

// Verified against on unknown emails so both failure paths hash once.
static DUMMY_PASSWORD: Lazy<Option<Password>> =
    Lazy::new(|| Password::new("dummy-password-for-unknown-users").ok());

/// Authentication service trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Check credentials and issue a signed token.
    ///
    /// `Ok(None)` for an unknown email or a wrong password; storage
    /// failures are errors.
    async fn login(&self, email: &str, password: &str) -> AppResult<Option<String>>;

    /// Subject of a valid, unexpired token.
    fn verify_token(&self, token: &str) -> Option<Uuid>;
}

/// Concrete implementation of AuthService over the user repository.
pub struct Authenticator {
    users: Arc<dyn UserRepository>,
    codec: TokenCodec,
    token_ttl_seconds: i64,
}

impl Authenticator {
    /// Create new auth service instance
    pub fn new(users: Arc<dyn UserRepository>, config: AuthServiceConfig) -> Self {
        Self {
            users,
            codec: TokenCodec::new(&config.secret),
            token_ttl_seconds: config.token_ttl_seconds,
        }
    }
}

#[async_trait]
impl AuthService for Authenticator {
    async fn login(&self, email: &str, password: &str) -> AppResult<Option<String>> {
        let email = normalize_email(email);

        let Some(user) = self.users.find_by_email(&email).await? else {
            if let Some(dummy) = DUMMY_PASSWORD.as_ref() {
                let _ = dummy.verify(password);
            }
            tracing::warn!("Login rejected");
            return Ok(None);
        };

        if !user.verify_password(password) {
            tracing::warn!("Login rejected");
            return Ok(None);
        }

        let exp = Utc::now()
            .timestamp()
            .checked_add(self.token_ttl_seconds)
            .ok_or_else(|| AppError::internal("Token expiry overflows"))?;
        let claims = Claims {
            sub: user.id(),
            exp,
        };
        let token = self.codec.encode(&claims)?;

        tracing::info!(user_id = %user.id(), "Token issued");
        Ok(Some(token))
    }

    fn verify_token(&self, token: &str) -> Option<Uuid> {
        let Some(claims) = self.codec.decode(token) else {
            tracing::debug!("Rejected malformed or forged token");
            return None;
        };

        if claims.exp <= Utc::now().timestamp() {
            tracing::debug!(user_id = %claims.sub, "Rejected expired token");
            return None;
        }

        Some(claims.sub)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::User;
    use mockall::predicate::eq;
    use user_service_lib::repository::MockUserRepository;

    const SECRET: &str = "0123456789abcdef0123456789abcdef";

    fn authenticator(repo: MockUserRepository, ttl: i64) -> Authenticator {
        let config = AuthServiceConfig::new(SECRET, ttl).unwrap();
        Authenticator::new(Arc::new(repo), config)
    }

    fn alice() -> User {
        User::create("Alice", "alice@example.com", None, "s3cret").unwrap()
    }

    #[tokio::test]
    async fn test_login_normalizes_email_before_lookup() {
        let user = alice();
        let id = user.id();

        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email()
            .with(eq("alice@example.com"))
            .times(1)
            .returning(move |_| Ok(Some(user.clone())));

        let auth = authenticator(repo, 3600);
        let token = auth.login(" Alice@Example.COM ", "s3cret").await.unwrap();

        assert_eq!(auth.verify_token(&token.unwrap()), Some(id));
    }

    #[tokio::test]
    async fn test_wrong_password_and_unknown_email_look_alike() {
        let user = alice();

        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email()
            .with(eq("alice@example.com"))
            .returning(move |_| Ok(Some(user.clone())));
        repo.expect_find_by_email()
            .with(eq("nobody@example.com"))
            .returning(|_| Ok(None));

        let auth = authenticator(repo, 3600);

        let wrong_password = auth.login("alice@example.com", "nope").await.unwrap();
        let unknown_email = auth.login("nobody@example.com", "s3cret").await.unwrap();

        assert_eq!(wrong_password, None);
        assert_eq!(unknown_email, None);
    }

    #[tokio::test]
    async fn test_login_propagates_storage_errors() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email()
            .returning(|_| Err(AppError::internal("database is locked")));

        let auth = authenticator(repo, 3600);
        let result = auth.login("alice@example.com", "s3cret").await;

        assert!(matches!(result, Err(AppError::Internal(_))));
    }

    #[tokio::test]
    async fn test_login_with_overflowing_ttl_is_internal_error() {
        let user = alice();

        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email()
            .returning(move |_| Ok(Some(user.clone())));

        // Bypasses the config bound to reach the overflow guard directly.
        let auth = Authenticator {
            users: Arc::new(repo),
            codec: TokenCodec::new(SECRET),
            token_ttl_seconds: i64::MAX,
        };

        let result = auth.login("alice@example.com", "s3cret").await;
        assert!(matches!(result, Err(AppError::Internal(_))));
    }

    #[tokio::test]
    async fn test_login_with_max_ttl_issues_verifiable_token() {
        let user = alice();
        let id = user.id();

        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email()
            .returning(move |_| Ok(Some(user.clone())));

        let auth = authenticator(repo, domain::MAX_TOKEN_TTL_SECONDS);
        let token = auth.login("alice@example.com", "s3cret").await.unwrap().unwrap();

        assert_eq!(auth.verify_token(&token), Some(id));
    }

    #[test]
    fn test_verify_rejects_expired_token() {
        let auth = authenticator(MockUserRepository::new(), 3600);
        let token = TokenCodec::new(SECRET)
            .encode(&Claims {
                sub: Uuid::new_v4(),
                exp: Utc::now().timestamp() - 1,
            })
            .unwrap();

        assert_eq!(auth.verify_token(&token), None);
    }

    #[test]
    fn test_verify_rejects_garbage() {
        let auth = authenticator(MockUserRepository::new(), 3600);
        assert_eq!(auth.verify_token("not.a.token"), None);
        assert_eq!(auth.verify_token(""), None);
    }
}
