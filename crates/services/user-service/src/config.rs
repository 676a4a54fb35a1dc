//! User service configuration.

use common::config::env_or;

/// Default SQLite database, created on first connect
pub const DEFAULT_DATABASE_URL: &str = "sqlite://data/identity.db?mode=rwc";

/// User service configuration.
#[derive(Debug, Clone)]
pub struct UserServiceConfig {
    /// Database connection URL
    pub database_url: String,
}

impl UserServiceConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self {
            database_url: env_or(
                &["USER_SERVICE_DATABASE_URL", "DATABASE_URL"],
                DEFAULT_DATABASE_URL,
            ),
        }
    }
}

impl Default for UserServiceConfig {
    fn default() -> Self {
        Self {
            database_url: DEFAULT_DATABASE_URL.to_string(),
        }
    }
}
