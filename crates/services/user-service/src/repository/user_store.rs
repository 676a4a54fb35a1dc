//! SeaORM-backed user repository.

use async_trait::async_trait;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, SqlErr,
};
use uuid::Uuid;

use common::{AppError, AppResult};
use domain::{normalize_email, User, EMAIL_TAKEN_MESSAGE};

use super::entities::user::{self, ActiveModel, Entity as UserEntity, Model};
use super::UserRepository;

/// Relational implementation of [`UserRepository`].
///
/// The `users.email` unique index is the final arbiter of uniqueness: a
/// concurrent duplicate insert surfaces as `Conflict`.
pub struct UserStore {
    db: DatabaseConnection,
}

impl UserStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

/// Map a write failure, turning unique-key violations into `Conflict`.
fn write_error(err: DbErr) -> AppError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(detail)) => {
            tracing::debug!("Unique constraint violated: {}", detail);
            if detail.contains("email") {
                AppError::conflict(EMAIL_TAKEN_MESSAGE)
            } else {
                AppError::conflict("user already exists")
            }
        }
        _ => AppError::from(err),
    }
}

fn to_domain(model: Model) -> AppResult<User> {
    model.into_domain().map_err(AppError::from)
}

#[async_trait]
impl UserRepository for UserStore {
    async fn save(&self, user: &User) -> AppResult<()> {
        let active = ActiveModel::from(user.to_primitives());

        UserEntity::insert(active)
            .exec_without_returning(&self.db)
            .await
            .map_err(write_error)?;

        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        UserEntity::find_by_id(id.to_string())
            .one(&self.db)
            .await?
            .map(to_domain)
            .transpose()
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        // Stored emails are already normalized
        UserEntity::find()
            .filter(user::Column::Email.eq(normalize_email(email)))
            .one(&self.db)
            .await?
            .map(to_domain)
            .transpose()
    }

    async fn find_all(&self) -> AppResult<Vec<User>> {
        UserEntity::find()
            .order_by_desc(user::Column::CreatedAt)
            .order_by_desc(user::Column::Id)
            .all(&self.db)
            .await?
            .into_iter()
            .map(to_domain)
            .collect()
    }

    async fn update(&self, user: &User) -> AppResult<()> {
        let p = user.to_primitives();

        let result = UserEntity::update_many()
            .col_expr(user::Column::Name, Expr::value(p.name))
            .col_expr(user::Column::Email, Expr::value(p.email))
            .col_expr(user::Column::Phone, Expr::value(p.phone))
            .col_expr(user::Column::PasswordHash, Expr::value(p.password_hash))
            .filter(user::Column::Id.eq(p.id))
            .exec(&self.db)
            .await
            .map_err(write_error)?;

        if result.rows_affected == 0 {
            tracing::debug!(user_id = %user.id(), "Update matched no rows");
        }
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        UserEntity::delete_by_id(id.to_string())
            .exec(&self.db)
            .await?;
        Ok(())
    }
}
