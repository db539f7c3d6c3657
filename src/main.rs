use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use tracing_subscriber::EnvFilter;

use school_registry::config::Config;
use school_registry::routes::create_routes;
use school_registry::services::build_blob_store;
use school_registry::state::AppState;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Parser)]
#[command(name = "school-registry", version, about = "Student, faculty and avatar registry")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Run pending migrations and start the HTTP server (default)
    Serve,
    /// Manage the database schema
    Migrate {
        #[arg(value_enum, default_value_t = MigrateAction::Up)]
        action: MigrateAction,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum MigrateAction {
    Up,
    Down,
    Fresh,
    Status,
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("school_registry=info,tower_http=info")),
        )
        .init();

    let cli = Cli::parse();
    let result = match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => serve().await,
        Command::Migrate { action } => migrate(action).await,
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

async fn connect(config: &Config) -> Result<DatabaseConnection, BoxError> {
    let mut options = ConnectOptions::new(config.database_url.clone());
    options.sqlx_logging(false);
    Ok(Database::connect(options).await?)
}

async fn serve() -> Result<(), BoxError> {
    let config = Config::from_env()?;
    let db = connect(&config).await?;

    Migrator::up(&db, None).await?;
    tracing::info!("Database schema is up to date");

    let blobs = build_blob_store(&config.avatar_storage).await?;
    let state = AppState::new(db, blobs, config.avatar_store_in_db, config.server_port);
    let app = create_routes(state, config.request_timeout, config.avatar_max_bytes);

    let listener = tokio::net::TcpListener::bind(config.bind_address()).await?;
    tracing::info!("Listening on {}", listener.local_addr()?);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn migrate(action: MigrateAction) -> Result<(), BoxError> {
    let config = Config::from_env()?;
    let db = connect(&config).await?;

    match action {
        MigrateAction::Up => Migrator::up(&db, None).await?,
        MigrateAction::Down => Migrator::down(&db, None).await?,
        MigrateAction::Fresh => Migrator::fresh(&db).await?,
        MigrateAction::Status => Migrator::status(&db).await?,
    }

    tracing::info!("Migration finished");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
    tracing::info!("Shutting down");
}
