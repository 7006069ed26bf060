//! Request-scoped SFTP sessions
//!
//! One session per listing request: connect with a timeout, authenticate,
//! open the SFTP subsystem, read one directory, disconnect. Nothing is
//! pooled or reused across requests.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use russh::client::{self, Handle};
use russh::keys::PrivateKeyWithHashAlg;
use russh::Disconnect;
use russh_sftp::client::SftpSession as RawSftpSession;
use russh_sftp::protocol::StatusCode;
use tokio::time::timeout;
use tracing::{debug, info, warn};

use super::config::SftpConfig;
use crate::error::{GatewayError, Result};
use crate::listing::{DirEntry, DirectoryLister};

/// SSH client handler for russh
///
/// Accepts any server host key: the gateway talks to a single
/// operator-configured host, and host-key pinning is left to the deployment
/// environment.
#[derive(Debug, Clone)]
struct ClientHandler;

impl client::Handler for ClientHandler {
    type Error = anyhow::Error;

    async fn check_server_key(
        &mut self,
        _server_public_key: &russh::keys::PublicKey,
    ) -> anyhow::Result<bool> {
        Ok(true)
    }
}

/// An open SFTP session against the configured remote host
///
/// Scoped to one request: acquired after parameter normalization, released
/// via [`SftpSession::close`] (or on drop, when the handle is torn down)
/// after the listing completes or fails.
pub struct SftpSession {
    handle: Handle<ClientHandler>,
    sftp: RawSftpSession,
}

impl SftpSession {
    /// Connect and authenticate, then open the SFTP subsystem
    pub async fn connect(config: &SftpConfig, connect_timeout: Duration) -> Result<Self> {
        let addr = config.addr();
        debug!("Connecting to SFTP server {}", addr);

        let ssh_config = Arc::new(client::Config::default());
        let connect_result = timeout(
            connect_timeout,
            client::connect(ssh_config, addr.as_str(), ClientHandler),
        )
        .await;

        let mut handle = match connect_result {
            Ok(Ok(handle)) => handle,
            Ok(Err(e)) => {
                return Err(GatewayError::connection(format!(
                    "Failed to connect to {}: {}",
                    addr, e
                )));
            }
            Err(_) => {
                return Err(GatewayError::connection(format!(
                    "Connection to {} timed out after {}s",
                    addr,
                    connect_timeout.as_secs()
                )));
            }
        };

        authenticate(&mut handle, config).await?;

        let channel = handle
            .channel_open_session()
            .await
            .map_err(|e| GatewayError::connection(format!("Failed to open channel: {}", e)))?;

        channel.request_subsystem(false, "sftp").await.map_err(|e| {
            GatewayError::connection(format!("Failed to request SFTP subsystem: {}", e))
        })?;

        let sftp = RawSftpSession::new(channel.into_stream()).await.map_err(|e| {
            GatewayError::connection(format!("Failed to initialize SFTP session: {}", e))
        })?;

        info!("SFTP connect success to {}@{}", config.username, addr);

        Ok(Self { handle, sftp })
    }

    /// List the entries of one remote directory
    pub async fn list_dir(&self, path: &str) -> Result<Vec<DirEntry>> {
        let read_dir = self
            .sftp
            .read_dir(path)
            .await
            .map_err(|e| map_sftp_error(path, e))?;

        Ok(read_dir
            .map(|entry| {
                let is_dir = entry.metadata().is_dir();
                DirEntry::new(entry.file_name(), is_dir)
            })
            .collect())
    }

    /// Disconnect from the remote host
    pub async fn close(self) {
        if let Err(e) = self
            .handle
            .disconnect(Disconnect::ByApplication, "", "")
            .await
        {
            warn!("SFTP disconnect failed: {}", e);
        }
    }
}

/// Authenticate with the SFTP server, password first, then key
async fn authenticate(handle: &mut Handle<ClientHandler>, config: &SftpConfig) -> Result<()> {
    if let Some(ref password) = config.password {
        debug!(
            "Attempting password authentication for user '{}'",
            config.username
        );
        let auth_result = handle
            .authenticate_password(&config.username, password)
            .await
            .map_err(|e| GatewayError::auth(e.to_string()))?;

        if auth_result.success() {
            return Ok(());
        }
        return Err(GatewayError::auth("Password authentication rejected"));
    }

    if let Some(ref key_content) = config.private_key {
        debug!(
            "Attempting key authentication for user '{}'",
            config.username
        );
        let key = russh::keys::PrivateKey::from_openssh(key_content.as_bytes())
            .map_err(|e| GatewayError::Key(format!("Failed to parse private key: {}", e)))?;
        let key_with_alg = PrivateKeyWithHashAlg::new(Arc::new(key), None);

        let auth_result = handle
            .authenticate_publickey(&config.username, key_with_alg)
            .await
            .map_err(|e| GatewayError::auth(e.to_string()))?;

        if auth_result.success() {
            return Ok(());
        }
        return Err(GatewayError::auth("Key authentication rejected"));
    }

    Err(GatewayError::auth(
        "No authentication method available (require password or private key)",
    ))
}

/// Map an SFTP client error to a tagged gateway error
///
/// The SFTP status code distinguishes a missing path from a denied one;
/// everything else stays a generic remote fault.
fn map_sftp_error(path: &str, err: russh_sftp::client::error::Error) -> GatewayError {
    use russh_sftp::client::error::Error as SftpError;

    match err {
        SftpError::Status(status) => match status.status_code {
            StatusCode::NoSuchFile => {
                GatewayError::PathNotFound(format!("{}: {}", path, status.error_message))
            }
            StatusCode::PermissionDenied => {
                GatewayError::PermissionDenied(format!("{}: {}", path, status.error_message))
            }
            _ => GatewayError::remote(format!("{}: {}", path, status.error_message)),
        },
        other => GatewayError::remote(other.to_string()),
    }
}

/// Per-request SFTP-backed [`DirectoryLister`]
///
/// Each call opens a fresh session, lists the directory, and disconnects on
/// both the success and failure paths.
pub struct SftpLister {
    config: SftpConfig,
    connect_timeout: Duration,
}

impl SftpLister {
    pub fn new(config: SftpConfig, connect_timeout: Duration) -> Self {
        Self {
            config,
            connect_timeout,
        }
    }
}

#[async_trait]
impl DirectoryLister for SftpLister {
    async fn list(&self, path: &str) -> Result<Vec<DirEntry>> {
        let session = SftpSession::connect(&self.config, self.connect_timeout).await?;
        let result = session.list_dir(path).await;
        session.close().await;
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_connect_to_closed_port_is_connection_error() {
        // Port 1 is not listening; the TCP connect fails fast.
        let config = SftpConfig::new("127.0.0.1", "testuser")
            .with_port(1)
            .with_password("testpass");

        let result = SftpSession::connect(&config, Duration::from_secs(5)).await;
        match result {
            Err(GatewayError::Connection(msg)) => assert!(!msg.is_empty()),
            other => panic!("expected connection error, got {:?}", other.map(|_| ())),
        }
    }

    #[tokio::test]
    async fn test_lister_surfaces_connection_failure() {
        let lister = SftpLister::new(
            SftpConfig::new("127.0.0.1", "testuser")
                .with_port(1)
                .with_password("testpass"),
            Duration::from_secs(5),
        );

        assert!(lister.list("/").await.is_err());
    }
}
