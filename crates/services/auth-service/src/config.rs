//! Auth service configuration.

use common::config::{env_parse, env_required};
use common::{AppError, AppResult};
use domain::{DEFAULT_TOKEN_TTL_SECONDS, MAX_TOKEN_TTL_SECONDS, MIN_TOKEN_SECRET_LENGTH};

/// Auth service configuration.
///
/// Built once at startup and moved into the service; there is no way to
/// change the secret or the TTL of a running [`Authenticator`](crate::Authenticator).
#[derive(Clone)]
pub struct AuthServiceConfig {
    /// HMAC key for signing tokens
    pub secret: String,
    /// Token lifetime in seconds
    pub token_ttl_seconds: i64,
}

impl AuthServiceConfig {
    /// Validate and build a configuration.
    ///
    /// # Errors
    /// Returns a config error if the secret is shorter than
    /// [`MIN_TOKEN_SECRET_LENGTH`] bytes or the TTL is outside
    /// `0..=`[`MAX_TOKEN_TTL_SECONDS`].
    pub fn new(secret: impl Into<String>, token_ttl_seconds: i64) -> AppResult<Self> {
        let secret = secret.into();
        if secret.len() < MIN_TOKEN_SECRET_LENGTH {
            return Err(AppError::config(format!(
                "AUTH_SECRET must be at least {} bytes",
                MIN_TOKEN_SECRET_LENGTH
            )));
        }
        if !(0..=MAX_TOKEN_TTL_SECONDS).contains(&token_ttl_seconds) {
            return Err(AppError::config(format!(
                "TOKEN_TTL_SECONDS must be between 0 and {}",
                MAX_TOKEN_TTL_SECONDS
            )));
        }

        Ok(Self {
            secret,
            token_ttl_seconds,
        })
    }

    /// Load configuration from environment variables.
    pub fn from_env() -> AppResult<Self> {
        let secret = env_required(&["AUTH_SECRET", "JWT_SECRET"])?;
        let ttl = env_parse(&["TOKEN_TTL_SECONDS"], DEFAULT_TOKEN_TTL_SECONDS)?;
        Self::new(secret, ttl)
    }
}

// Don't expose the secret in debug output
impl std::fmt::Debug for AuthServiceConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthServiceConfig")
            .field("secret", &"[REDACTED]")
            .field("token_ttl_seconds", &self.token_ttl_seconds)
            .finish()
    }
}
