//! User database entity for SeaORM.

use sea_orm::entity::prelude::*;
use sea_orm::Set;

use domain::{DomainResult, User, UserPrimitives};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub name: String,
    #[sea_orm(unique)]
    pub email: String,
    pub phone: Option<String>,
    pub password_hash: String,
    /// RFC 3339 UTC, fixed microsecond precision (sorts lexically)
    pub created_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Insertable row built from the aggregate's primitives
impl From<UserPrimitives> for ActiveModel {
    fn from(p: UserPrimitives) -> Self {
        Self {
            id: Set(p.id),
            name: Set(p.name),
            email: Set(p.email),
            phone: Set(p.phone),
            password_hash: Set(p.password_hash),
            created_at: Set(p.created_at),
        }
    }
}

impl Model {
    /// Rebuild the aggregate from a stored row.
    pub fn into_domain(self) -> DomainResult<User> {
        User::from_primitives(UserPrimitives {
            id: self.id,
            name: self.name,
            email: self.email,
            phone: self.phone,
            password_hash: self.password_hash,
            created_at: self.created_at,
        })
    }
}
