//! User Service Library
//!
//! User registration and profile management over a pluggable
//! [`UserRepository`](repository::UserRepository). The gateway embeds it
//! through [`open`]; the CLI drives the schema through [`run_migrations`].

pub mod config;
pub mod infra;
pub mod repository;
pub mod service;

use std::sync::Arc;

use common::AppResult;
use tracing::info;

use crate::config::UserServiceConfig;
use crate::infra::Database;
use crate::repository::{UserRepository, UserStore};
use crate::service::UserManager;

/// Connect to the configured database, apply pending migrations, and wire
/// the SQL-backed repository into a [`UserManager`].
pub async fn open(config: &UserServiceConfig) -> AppResult<(Arc<dyn UserRepository>, UserManager)> {
    let db = Database::connect(&config.database_url).await?;
    info!(database_url = %config.database_url, "User store ready");

    let repo: Arc<dyn UserRepository> = Arc::new(UserStore::new(db.get_connection()));
    let service = UserManager::new(repo.clone());

    Ok((repo, service))
}

/// Run migrations (for CLI commands).
pub async fn run_migrations(config: &UserServiceConfig, action: MigrateAction) -> AppResult<()> {
    let db = Database::connect_without_migrations(&config.database_url).await?;

    match action {
        MigrateAction::Up => {
            db.run_migrations().await?;
            info!("Migrations applied successfully");
        }
        MigrateAction::Down => {
            db.rollback_migration().await?;
            info!("Rolled back last migration");
        }
        MigrateAction::Status => {
            let status = db.migration_status().await?;
            for (name, applied) in status {
                let marker = if applied { "[x]" } else { "[ ]" };
                println!("{} {}", marker, name);
            }
        }
        MigrateAction::Fresh => {
            db.fresh_migrations().await?;
            info!("Database reset and migrations applied");
        }
    }

    Ok(())
}

/// Migration action type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MigrateAction {
    Up,
    Down,
    Status,
    Fresh,
}
