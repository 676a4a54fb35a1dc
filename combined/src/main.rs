//! Identity server binary - HTTP API and schema management in one process.

use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use auth_service_lib::{AuthServiceConfig, Authenticator};
use gateway_lib::config::GatewayConfig;
use gateway_lib::state::AppState;
use user_service_lib::config::UserServiceConfig;
use user_service_lib::repository::{InMemoryUserStore, UserRepository};
use user_service_lib::service::UserManager;

#[derive(Parser)]
#[command(name = "identity")]
#[command(about = "User identity service: registration, profiles and session tokens")]
struct Cli {
    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        /// Overrides SERVER_HOST
        #[arg(long)]
        host: Option<String>,
        /// Overrides SERVER_PORT
        #[arg(long)]
        port: Option<u16>,
        /// Keep users in memory instead of the database
        #[arg(long)]
        in_memory: bool,
    },
    /// Database migration commands
    Migrate {
        #[command(subcommand)]
        action: MigrateCommands,
    },
}

#[derive(Subcommand, Clone, Copy)]
enum MigrateCommands {
    /// Run pending migrations
    Up,
    /// Rollback last migration
    Down,
    /// Show migration status
    Status,
    /// Reset database and run all migrations
    Fresh,
}

impl From<MigrateCommands> for user_service_lib::MigrateAction {
    fn from(action: MigrateCommands) -> Self {
        match action {
            MigrateCommands::Up => Self::Up,
            MigrateCommands::Down => Self::Down,
            MigrateCommands::Status => Self::Status,
            MigrateCommands::Fresh => Self::Fresh,
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // Initialize tracing
    let default_filter = if cli.verbose {
        "debug,sqlx=warn"
    } else {
        "info,tower_http=debug"
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    match cli.command {
        Commands::Serve {
            host,
            port,
            in_memory,
        } => {
            let mut gateway_config = GatewayConfig::from_env()?;
            if let Some(host) = host {
                gateway_config.host = host;
            }
            if let Some(port) = port {
                gateway_config.port = port;
            }
            let auth_config = AuthServiceConfig::from_env()?;

            let (repo, users): (Arc<dyn UserRepository>, UserManager) = if in_memory {
                info!("Using in-memory user store");
                let repo: Arc<dyn UserRepository> = Arc::new(InMemoryUserStore::new());
                (repo.clone(), UserManager::new(repo))
            } else {
                user_service_lib::open(&UserServiceConfig::from_env()).await?
            };

            let auth = Authenticator::new(repo, auth_config);
            let state = AppState::new(Arc::new(users), Arc::new(auth));

            gateway_lib::run(&gateway_config, state).await?;
        }
        Commands::Migrate { action } => {
            user_service_lib::run_migrations(&UserServiceConfig::from_env(), action.into()).await?;
        }
    }

    Ok(())
}
