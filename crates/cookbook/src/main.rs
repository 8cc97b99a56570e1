mod app;
mod config;
mod context;
mod handlers;
mod middleware;
mod models;
mod state;
mod stats;
mod storage;

use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, ValueEnum};
use listenfd::ListenFd;
use tokio::{net::TcpListener, signal, sync::Notify};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::{
    app::create_app, config::Config, state::AppState, stats::Stats, storage::StorageBackend,
};

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum LogFormat {
    Text,
    Json,
}

/// Cookbook - A catalog service for recipes
#[derive(Parser, Debug)]
#[command(name = "cookbook")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Host address to bind the server to
    #[arg(long, short = 'H', default_value = "127.0.0.1", env = "HTTP_HOST")]
    host: String,

    /// Port to listen on
    #[arg(long, short, default_value = "8080", env = "HTTP_PORT")]
    port: u16,

    /// Storage backend holding recipes
    #[arg(long, value_enum, default_value = "memory", env = "DB_TYPE")]
    backend: StorageBackend,

    /// Log output format
    #[arg(long, value_enum, default_value = "text", env = "LOG_FORMAT")]
    log_format: LogFormat,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.log_format);

    let config = Config::from_env();

    let repository = cli.backend.build(&config).await?;
    let stats = Arc::new(Stats::new(
        config.service_name.clone(),
        config.environment.clone(),
        config.host_ip.clone(),
    ));
    let state = AppState::new(repository.clone(), stats.clone());

    // Build the application router
    let app = create_app(state, &config);

    // Auto-reload support via listenfd
    let mut listenfd = ListenFd::from_env();
    let listener = match listenfd.take_tcp_listener(0)? {
        // If we are given a tcp listener on listen fd 0, use that one
        Some(listener) => {
            listener.set_nonblocking(true)?;
            TcpListener::from_std(listener)?
        }
        // Otherwise fall back to CLI-specified host:port
        None => {
            let addr = format!("{}:{}", cli.host, cli.port);
            TcpListener::bind(&addr).await?
        }
    };

    tracing::info!(
        backend = ?cli.backend,
        "listening on {}",
        listener.local_addr()?
    );

    // Run the server with graceful shutdown, bounded by the drain timeout
    let draining = Arc::new(Notify::new());
    let server = axum::serve(listener, app).with_graceful_shutdown({
        let draining = draining.clone();
        async move {
            shutdown_signal().await;
            draining.notify_one();
        }
    });
    let drain_timeout = config.shutdown_timeout();

    tokio::select! {
        result = async { server.await } => result?,
        () = async {
            draining.notified().await;
            tokio::time::sleep(drain_timeout).await;
        } => {
            tracing::warn!(
                timeout_secs = drain_timeout.as_secs(),
                "Shutdown timeout elapsed, dropping open connections"
            );
        }
    }

    stats.shutdown();
    repository.shutdown().await;
    tracing::info!("Server stopped");
    Ok(())
}

/// Install the global tracing subscriber.
///
/// `RUST_LOG` overrides the default filter.
fn init_tracing(format: LogFormat) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "cookbook=debug,cookbook_core=debug,tower_http=debug".into());
    let registry = tracing_subscriber::registry().with(filter);

    match format {
        LogFormat::Text => registry.with(tracing_subscriber::fmt::layer()).init(),
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json())
            .init(),
    }
}

/// Wait for shutdown signals (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, shutting down...");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, shutting down...");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::try_parse_from(["cookbook"]).unwrap();

        assert_eq!(cli.backend, StorageBackend::Memory);
        assert_eq!(cli.log_format, LogFormat::Text);
    }

    #[test]
    fn test_cli_selects_backend() {
        let cli = Cli::try_parse_from(["cookbook", "--backend", "dynamodb", "-p", "9000"]).unwrap();

        assert_eq!(cli.backend, StorageBackend::DynamoDb);
        assert_eq!(cli.port, 9000);
    }

    #[test]
    fn test_cli_rejects_unknown_backend() {
        assert!(Cli::try_parse_from(["cookbook", "--backend", "mongo"]).is_err());
    }
}
