//! Configuration and CLI argument parsing for the SFTP gateway

use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;

use crate::error::{GatewayError, Result};

/// Default SFTP port
pub const DEFAULT_SFTP_PORT: u16 = 22;

/// Default public IP-lookup endpoint for the echo handler
pub const DEFAULT_ECHO_URL: &str = "https://ifconfig.me";

/// SSH connection timeout in seconds
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 30;

/// SFTP gateway CLI arguments
#[derive(Parser, Debug, Clone)]
#[command(name = "sftp-gateway")]
#[command(version)]
#[command(about = "HTTP gateway exposing SFTP directory listings and an outbound IP echo")]
pub struct Args {
    /// SFTP host to connect to
    #[arg(long, env = "SFTP_HOST")]
    pub host: String,

    /// SFTP port
    #[arg(long, default_value = "22", env = "SFTP_PORT")]
    pub port: u16,

    /// SFTP username
    #[arg(long, env = "SFTP_USERNAME")]
    pub user: String,

    /// SFTP password (alternative to key)
    #[arg(long, env = "SFTP_PASSWORD")]
    pub password: Option<String>,

    /// Path to SSH private key file (alternative to password)
    #[arg(long, env = "SFTP_KEY")]
    pub key: Option<PathBuf>,

    /// Address the HTTP server listens on
    #[arg(long, default_value = "0.0.0.0:8080", env = "LISTEN_ADDR")]
    pub listen: SocketAddr,

    /// URL of the public IP-lookup service used by /ipEcho
    #[arg(long, default_value = DEFAULT_ECHO_URL, env = "IP_ECHO_URL")]
    pub echo_url: String,

    /// SSH connection timeout in seconds
    #[arg(long, default_value = "30", env = "SFTP_CONNECT_TIMEOUT")]
    pub connect_timeout: u64,
}

/// Parsed and validated configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// SFTP host
    pub host: String,

    /// SFTP port
    pub port: u16,

    /// SFTP username
    pub user: String,

    /// SFTP password
    pub password: Option<String>,

    /// Path to SSH private key
    pub key: Option<PathBuf>,

    /// HTTP listen address
    pub listen: SocketAddr,

    /// IP-lookup URL for the echo handler
    pub echo_url: String,

    /// SSH connection timeout in seconds
    pub connect_timeout_secs: u64,
}

impl Config {
    /// Create Config from CLI Args
    pub fn from_args(args: Args) -> Result<Self> {
        validate_args(&args)?;

        Ok(Config {
            host: args.host,
            port: args.port,
            user: args.user,
            password: sanitize_password(args.password),
            key: args.key,
            listen: args.listen,
            echo_url: args.echo_url,
            connect_timeout_secs: args.connect_timeout,
        })
    }
}

/// Validate CLI arguments
fn validate_args(args: &Args) -> Result<()> {
    let mut errors = Vec::new();

    if args.host.is_empty() {
        errors.push("Missing required --host (SFTP_HOST)".to_string());
    }

    if args.user.is_empty() {
        errors.push("Missing required --user (SFTP_USERNAME)".to_string());
    }

    // Must have either password or key
    let has_password = args.password.as_deref().is_some_and(|p| !p.is_empty());
    if !has_password && args.key.is_none() {
        errors.push("Must provide either --password or --key".to_string());
    }

    // If key is provided, check if file exists
    if let Some(ref key_path) = args.key {
        if !key_path.exists() {
            errors.push(format!("SSH key file not found: {}", key_path.display()));
        }
    }

    if args.echo_url.is_empty() {
        errors.push("--echo-url must not be empty".to_string());
    }

    if !errors.is_empty() {
        return Err(GatewayError::config(format!(
            "Configuration error:\n{}",
            errors.join("\n")
        )));
    }

    Ok(())
}

/// Sanitize password: return None if empty
fn sanitize_password(password: Option<String>) -> Option<String> {
    password.filter(|p| !p.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_args() -> Args {
        Args {
            host: "sftp.example.com".to_string(),
            port: DEFAULT_SFTP_PORT,
            user: "deploy".to_string(),
            password: Some("secret".to_string()),
            key: None,
            listen: "127.0.0.1:8080".parse().unwrap(),
            echo_url: DEFAULT_ECHO_URL.to_string(),
            connect_timeout: DEFAULT_CONNECT_TIMEOUT_SECS,
        }
    }

    #[test]
    fn test_valid_args() {
        let config = Config::from_args(base_args()).unwrap();
        assert_eq!(config.host, "sftp.example.com");
        assert_eq!(config.port, 22);
        assert_eq!(config.password, Some("secret".to_string()));
    }

    #[test]
    fn test_missing_host_rejected() {
        let mut args = base_args();
        args.host = String::new();
        let err = Config::from_args(args).unwrap_err();
        assert!(err.to_string().contains("SFTP_HOST"));
    }

    #[test]
    fn test_missing_user_rejected() {
        let mut args = base_args();
        args.user = String::new();
        assert!(Config::from_args(args).is_err());
    }

    #[test]
    fn test_missing_credentials_rejected() {
        let mut args = base_args();
        args.password = None;
        args.key = None;
        let err = Config::from_args(args).unwrap_err();
        assert!(err.to_string().contains("--password or --key"));
    }

    #[test]
    fn test_empty_password_counts_as_absent() {
        let mut args = base_args();
        args.password = Some(String::new());
        args.key = None;
        assert!(Config::from_args(args).is_err());
    }

    #[test]
    fn test_missing_key_file_rejected() {
        let mut args = base_args();
        args.password = None;
        args.key = Some(PathBuf::from("/nonexistent/id_ed25519"));
        let err = Config::from_args(args).unwrap_err();
        assert!(err.to_string().contains("key file not found"));
    }

    #[test]
    fn test_sanitize_password() {
        assert_eq!(
            sanitize_password(Some("secret".to_string())),
            Some("secret".to_string())
        );
        assert_eq!(sanitize_password(Some(String::new())), None);
        assert_eq!(sanitize_password(None), None);
    }
}
