//! In-memory user repository implementation.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use common::{AppError, AppResult};
use domain::{normalize_email, User, UserPrimitives, EMAIL_TAKEN_MESSAGE};

use super::UserRepository;

#[derive(Debug, Default)]
struct Tables {
    users: HashMap<Uuid, User>,
    /// Normalized email -> user id
    email_index: HashMap<String, Uuid>,
}

/// In-memory implementation of [`UserRepository`].
///
/// Both maps sit behind one lock, so every operation is atomic and the
/// email index never disagrees with the rows.
#[derive(Debug, Clone, Default)]
pub struct InMemoryUserStore {
    tables: Arc<RwLock<Tables>>,
}

impl InMemoryUserStore {
    /// Create a new empty repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored users
    pub async fn len(&self) -> usize {
        self.tables.read().await.users.len()
    }

    /// True when no user is stored
    pub async fn is_empty(&self) -> bool {
        self.tables.read().await.users.is_empty()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserStore {
    async fn save(&self, user: &User) -> AppResult<()> {
        let mut tables = self.tables.write().await;
        let email = normalize_email(user.email());

        if tables.users.contains_key(&user.id()) {
            return Err(AppError::conflict(format!(
                "user {} already exists",
                user.id()
            )));
        }
        if tables.email_index.contains_key(&email) {
            return Err(AppError::conflict(EMAIL_TAKEN_MESSAGE));
        }

        tables.email_index.insert(email, user.id());
        tables.users.insert(user.id(), user.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        Ok(self.tables.read().await.users.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let tables = self.tables.read().await;
        Ok(tables
            .email_index
            .get(&normalize_email(email))
            .and_then(|id| tables.users.get(id))
            .cloned())
    }

    async fn find_all(&self) -> AppResult<Vec<User>> {
        let tables = self.tables.read().await;
        let mut users: Vec<User> = tables.users.values().cloned().collect();
        users.sort_by(|a, b| {
            b.created_at()
                .cmp(&a.created_at())
                .then_with(|| b.id().cmp(&a.id()))
        });
        Ok(users)
    }

    async fn update(&self, user: &User) -> AppResult<()> {
        let mut tables = self.tables.write().await;

        let Some(stored) = tables.users.get(&user.id()) else {
            return Ok(());
        };

        let old_email = normalize_email(stored.email());
        let new_email = normalize_email(user.email());
        if old_email != new_email {
            if let Some(owner) = tables.email_index.get(&new_email) {
                if *owner != user.id() {
                    return Err(AppError::conflict(EMAIL_TAKEN_MESSAGE));
                }
            }
        }

        // Only the mutable columns change; creation time stays as stored.
        let row = User::from_primitives(UserPrimitives {
            created_at: stored.to_primitives().created_at,
            ..user.to_primitives()
        })?;

        tables.email_index.remove(&old_email);
        tables.email_index.insert(new_email, user.id());
        tables.users.insert(user.id(), row);
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        let mut tables = self.tables.write().await;
        if let Some(user) = tables.users.remove(&id) {
            tables.email_index.remove(&normalize_email(user.email()));
        }
        Ok(())
    }
}
