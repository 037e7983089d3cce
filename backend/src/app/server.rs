use std::error::Error;

use clap::Parser;
use thiserror::Error;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::app;
use crate::cfg;
use crate::core;

/// Application-level error type
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    ConfigLoadingFailed(#[from] config::ConfigError),

    #[error("CLI error: {0}")]
    CliOperationFailed(#[from] app::CliError),

    #[error("Server error: {0}")]
    ServerStartingFailed(#[from] std::io::Error),

    #[error("HTTP client error: {0}")]
    HttpClientError(#[from] reqwest::Error),
}

pub fn run() {
    if let Err(e) = run_app() {
        eprintln!("❌ {e}\n");

        let mut source = e.source();
        while let Some(err) = source {
            eprintln!("Caused by: {err}");
            source = err.source();
        }

        std::process::exit(1);
    }
}

fn run_app() -> Result<(), AppError> {
    let cli = app::Cli::parse();
    let mut settings = cfg::AppSettings::new()?;
    cli.apply_overrides(&mut settings);

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(settings.server.effective_log_directives()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // worker threads follow the production flag, so the runtime is built by hand
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(settings.server.worker_count())
        .enable_all()
        .build()?;

    runtime.block_on(async_main(cli.command(), settings))
}

async fn async_main(command: app::Command, settings: cfg::AppSettings) -> Result<(), AppError> {
    if app::run_cli(command, &settings).await? {
        return Ok(());
    }
    serve(settings).await
}

async fn serve(settings: cfg::AppSettings) -> Result<(), AppError> {
    let server_address = settings.get_server_address();
    let listener = bind_listener(&server_address).await?;

    let http_client = reqwest::Client::builder().build()?;
    let context = core::Context::new(http_client, settings);

    tracing::info!("🚀 starting server");
    tracing::info!("   mode:    {}", context.settings.server.mode_name());
    tracing::info!("   workers: {}", context.settings.server.worker_count());
    tracing::info!("   cfg_dir: {}", cfg::AppSettings::get_config_full_path());
    tracing::info!("   logging: {}", context.settings.server.effective_log_directives());
    tracing::info!("   assets:  {} ({:?})", context.static_root.dir.display(), context.static_root.kind);
    tracing::info!("   data:    {}", context.settings.storage.snapshot_path.display());
    tracing::info!("   address: http://{server_address}");
    if !context.settings.sheetdb.is_configured() {
        tracing::warn!("SHEETDB_API_ID is not set, /api/sheet-data serves fixture records");
    }

    let router = app::create_router(context);
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Binds `host:port`, resolving host names such as `localhost` as well as IPv4/IPv6 literals.
pub async fn bind_listener(address: &str) -> std::io::Result<tokio::net::TcpListener> {
    tokio::net::TcpListener::bind(address).await
}

/// Tokio signal handler that will wait for a user to press CTRL+C.
/// We use this in our `Server` method `with_graceful_shutdown`.
async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::info!("Shutdown signal received, shutting down gracefully"),
        Err(e) => tracing::error!("Failed to listen for shutdown signal: {}", e),
    }
}
