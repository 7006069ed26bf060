//! SFTP gateway - entry point
//!
//! Parses CLI arguments, validates configuration, and serves the HTTP
//! endpoints until SIGINT/SIGTERM.

use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use sftp_gateway::config::{Args, Config};
use sftp_gateway::error::{GatewayError, Result};
use sftp_gateway::server::{router, AppState};
use sftp_gateway::sftp::{SftpConfig, SftpLister};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    // Parse CLI arguments
    let args = Args::parse();

    // Validate and create config
    let config = Config::from_args(args)?;

    info!("SFTP gateway v{} starting...", env!("CARGO_PKG_VERSION"));
    info!(
        "Remote target {}@{}:{}",
        config.user, config.host, config.port
    );

    // Build SFTP connection parameters
    let mut sftp_config = SftpConfig::new(&config.host, &config.user).with_port(config.port);

    if let Some(ref password) = config.password {
        sftp_config = sftp_config.with_password(password);
    }

    if let Some(ref key_path) = config.key {
        // Read the key file once at startup
        let key_content = tokio::fs::read_to_string(key_path)
            .await
            .map_err(GatewayError::Io)?;
        sftp_config = sftp_config.with_private_key(&key_content);
    }

    let lister = Arc::new(SftpLister::new(
        sftp_config,
        Duration::from_secs(config.connect_timeout_secs),
    ));

    let state = Arc::new(AppState::new(&config, lister));
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(config.listen)
        .await
        .map_err(GatewayError::Io)?;

    info!("Listening on http://{}", config.listen);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(GatewayError::Io)?;

    info!("SFTP gateway stopped");

    Ok(())
}

/// Resolve on SIGINT (Ctrl+C) or SIGTERM
async fn shutdown_signal() {
    tokio::select! {
        _ = tokio::signal::ctrl_c() => {
            info!("Received SIGINT (Ctrl+C), shutting down...");
        }
        _ = async {
            #[cfg(unix)]
            {
                let mut sigterm = tokio::signal::unix::signal(
                    tokio::signal::unix::SignalKind::terminate()
                ).expect("Failed to register SIGTERM handler");
                sigterm.recv().await;
            }
            #[cfg(not(unix))]
            {
                std::future::pending::<()>().await;
            }
        } => {
            info!("Received SIGTERM, shutting down...");
        }
    }
}
