//! User aggregate and related types.

use chrono::{DateTime, SecondsFormat, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::ValidateEmail;

use crate::constants::MIN_NAME_LENGTH;
use crate::error::{DomainError, DomainResult};
use crate::password::Password;

/// Canonical form of an email address: trimmed and lower-cased.
///
/// Every lookup and every stored email goes through this function, so two
/// spellings that differ only in case or surrounding whitespace collide.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// User aggregate root.
///
/// Fields are private: the only way to change a user is through the
/// validating setters below. `id` and `created_at` have no setter.
#[derive(Debug, Clone)]
pub struct User {
    id: Uuid,
    name: String,
    email: String,
    phone: Option<String>,
    password: Password,
    created_at: DateTime<Utc>,
}

impl User {
    /// Register a new identity.
    ///
    /// Generates a v4 id, stamps `created_at`, lower-cases the email and
    /// hashes the plaintext password. The email is *not* syntax-checked on
    /// this path; `set_email` is the validating entry point.
    ///
    /// # Errors
    /// * `Validation` if the trimmed name is empty
    /// * `Internal` if password hashing fails
    pub fn create(
        name: &str,
        email: &str,
        phone: Option<&str>,
        plain_password: &str,
    ) -> DomainResult<Self> {
        Ok(Self {
            id: Uuid::new_v4(),
            name: validated_name(name)?,
            email: normalize_email(email),
            phone: phone.map(|p| p.trim().to_string()),
            password: Password::new(plain_password)?,
            // Storage keeps microseconds; truncate so a round trip is exact.
            created_at: Utc::now().trunc_subsecs(6),
        })
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn phone(&self) -> Option<&str> {
        self.phone.as_deref()
    }

    /// Stored Argon2 hash (never the plaintext).
    pub fn password_hash(&self) -> &str {
        self.password.as_str()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Replace the display name. Fails if the trimmed name is empty.
    pub fn set_name(&mut self, name: &str) -> DomainResult<()> {
        self.name = validated_name(name)?;
        Ok(())
    }

    /// Replace the email. Fails unless the normalized value is a valid address.
    pub fn set_email(&mut self, email: &str) -> DomainResult<()> {
        let email = normalize_email(email);
        if !email.validate_email() {
            return Err(DomainError::validation("Invalid email address"));
        }
        self.email = email;
        Ok(())
    }

    /// Replace the phone. No format rules; trimmed when present.
    pub fn set_phone(&mut self, phone: Option<&str>) {
        self.phone = phone.map(|p| p.trim().to_string());
    }

    /// Re-hash and replace the stored password.
    pub fn change_password(&mut self, plain_password: &str) -> DomainResult<()> {
        self.password = Password::new(plain_password)?;
        Ok(())
    }

    /// Check a plaintext candidate against the stored hash.
    pub fn verify_password(&self, plain_password: &str) -> bool {
        self.password.verify(plain_password)
    }

    /// Flatten into the storage/wire shape.
    pub fn to_primitives(&self) -> UserPrimitives {
        UserPrimitives {
            id: self.id.to_string(),
            name: self.name.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
            password_hash: self.password.as_str().to_string(),
            created_at: self
                .created_at
                .to_rfc3339_opts(SecondsFormat::Micros, true),
        }
    }

    /// Rebuild a user from its primitives (e.g. a stored row).
    ///
    /// # Errors
    /// Returns an internal error when the record is corrupt: unparsable id
    /// or timestamp, or an empty hash.
    pub fn from_primitives(data: UserPrimitives) -> DomainResult<Self> {
        let id = Uuid::parse_str(&data.id)
            .map_err(|e| DomainError::internal(format!("Corrupt user id '{}': {}", data.id, e)))?;
        let created_at = DateTime::parse_from_rfc3339(&data.created_at)
            .map_err(|e| {
                DomainError::internal(format!(
                    "Corrupt created_at '{}': {}",
                    data.created_at, e
                ))
            })?
            .with_timezone(&Utc);
        if data.password_hash.is_empty() {
            return Err(DomainError::internal(format!(
                "User {} has an empty password hash",
                id
            )));
        }

        Ok(Self {
            id,
            name: data.name,
            email: data.email,
            phone: data.phone,
            password: Password::from_hash(data.password_hash),
            created_at,
        })
    }
}

fn validated_name(name: &str) -> DomainResult<String> {
    let name = name.trim();
    if name.chars().count() < MIN_NAME_LENGTH {
        return Err(DomainError::validation("Name cannot be empty"));
    }
    Ok(name.to_string())
}

/// Flat representation of a user, as persisted and as exchanged on the wire.
///
/// Carries the password *hash*; strip it before exposing to clients
/// (see [`UserResponse`]).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserPrimitives {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub password_hash: String,
    /// RFC 3339 UTC timestamp with microsecond precision
    pub created_at: String,
}

/// User registration data transfer object
#[derive(Clone, Deserialize)]
pub struct CreateUser {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    pub password: String,
}

impl std::fmt::Debug for CreateUser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CreateUser")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("phone", &self.phone)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Partial update: only the fields that are `Some` are applied.
#[derive(Clone, Default, Deserialize)]
pub struct UpdateUser {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub password: Option<String>,
}

impl UpdateUser {
    /// True when no field is set.
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none() && self.phone.is_none() && self.password.is_none()
    }
}

impl std::fmt::Debug for UpdateUser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UpdateUser")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("phone", &self.phone)
            .field("password", &self.password.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

/// User response (safe to return to client)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
            phone: user.phone.clone(),
            created_at: user.created_at,
        }
    }
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            phone: user.phone,
            created_at: user.created_at,
        }
    }
}
