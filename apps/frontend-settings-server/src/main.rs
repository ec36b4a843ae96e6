mod config;
mod http;
mod logging;
mod shutdown;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use frontend_settings::FrontendSettingsModule;
use mimalloc::MiMalloc;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use settings_auth::AuthState;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;

use crate::config::{AppConfig, CliOverrides, DatabaseConfig, GrpcConfig};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

/// Frontend Settings Server - display preferences, module settings and UI state
#[derive(Parser)]
#[command(name = "frontend-settings-server")]
#[command(about = "Frontend Settings Server - display preferences, module settings and UI state")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Port override for HTTP server (overrides config)
    #[arg(short, long)]
    port: Option<u16>,

    /// Print effective configuration (YAML) and exit
    #[arg(long)]
    print_config: bool,

    /// Log verbosity level (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Use mock database (sqlite::memory:)
    #[arg(long)]
    mock: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the server
    Run,
    /// Validate configuration and exit
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Layered config:
    // 1) defaults -> 2) YAML (if provided) -> 3) env (APP__*) -> 4) CLI overrides
    let mut config = AppConfig::load(cli.config.as_deref())?;
    config.apply_cli_overrides(CliOverrides {
        port: cli.port,
        verbose: cli.verbose,
        mock: cli.mock,
    });

    if cli.print_config {
        println!("{}", config.to_yaml()?);
        return Ok(());
    }

    logging::init_logging(&config.logging, cli.verbose)?;

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => run_server(config).await,
        Commands::Check => check_config(&config),
    }
}

fn check_config(config: &AppConfig) -> Result<()> {
    tracing::info!("Checking configuration...");
    config.validate()?;
    println!("Configuration is valid");
    Ok(())
}

async fn connect_db(cfg: &DatabaseConfig, in_memory: bool) -> Result<DatabaseConnection> {
    let mut opts = ConnectOptions::new(cfg.url.clone());
    opts.connect_timeout(cfg.connect_timeout).sqlx_logging(false);
    if in_memory {
        // Every connection to `sqlite::memory:` is a separate database.
        tracing::info!("Mock mode enabled: using in-memory SQLite");
        opts.max_connections(1).min_connections(1);
    } else {
        opts.max_connections(cfg.max_connections);
    }
    Database::connect(opts)
        .await
        .context("failed to connect to database")
}

async fn run_server(config: AppConfig) -> Result<()> {
    config.validate()?;
    tracing::info!("Frontend Settings Server starting");

    let db = connect_db(&config.database, config.is_in_memory_db()).await?;
    if config.database.run_migrations || config.is_in_memory_db() {
        FrontendSettingsModule::migrate(&db).await?;
    }

    let module = FrontendSettingsModule::new(&db, config.frontend_settings.clone());
    let authenticator = settings_auth::build_authenticator(&config.security)?;
    tracing::info!(strategy = ?config.security.strategy, "Identity strategy selected");

    let cancel = CancellationToken::new();
    shutdown::cancel_on_signal(cancel.clone());

    let sweeper = module.spawn_sweeper(cancel.child_token());
    let grpc = config
        .grpc
        .enabled
        .then(|| tokio::spawn(serve_grpc(config.grpc.clone(), &module, cancel.clone())));

    let app = http::build_router(
        &config.server,
        module.rest_router(AuthState::new(authenticator)),
    );
    let listener = TcpListener::bind(config.server.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.server.bind_addr))?;
    tracing::info!(addr = %config.server.bind_addr, prefix = %config.server.prefix, "REST server listening");

    let served = axum::serve(listener, app)
        .with_graceful_shutdown(cancel.clone().cancelled_owned())
        .await
        .context("REST server failed");
    cancel.cancel();

    if let Some(grpc) = grpc {
        grpc.await.context("gRPC task panicked")??;
    }
    if let Err(e) = sweeper.await {
        tracing::warn!(error = %e, "State sweeper task ended abnormally");
    }
    db.close().await.context("failed to close database")?;
    tracing::info!("Frontend Settings Server stopped");
    served
}

fn serve_grpc(
    cfg: GrpcConfig,
    module: &FrontendSettingsModule,
    cancel: CancellationToken,
) -> impl Future<Output = Result<()>> + Send + 'static {
    let service = module.grpc_service();
    async move {
        tracing::info!(addr = %cfg.bind_addr, "gRPC server listening");
        let result = tonic::transport::Server::builder()
            .add_service(service)
            .serve_with_shutdown(cfg.bind_addr, cancel.clone().cancelled_owned())
            .await
            .context("gRPC server failed");
        cancel.cancel();
        result
    }
}
