//! SFTP gateway - an HTTP service for remote directory listings
//!
//! This crate provides a small HTTP server with two user-facing endpoints:
//! a directory listing of a remote SFTP host, and an echo of the service's
//! own outbound IP address as seen by a public lookup service.
//!
//! # Endpoints
//!
//! - `GET /ipEcho` - returns the body of a GET to the configured IP-lookup
//!   URL, verbatim
//! - `GET /sftpListDir/{path*}` - lists a remote directory: subdirectories
//!   and files partitioned, sorted, and newline-delimited
//! - `GET /health`, `GET /status` - liveness and uptime
//!
//! # Example Usage (CLI)
//!
//! ```bash
//! sftp-gateway --host=sftp.example.com --user=deploy --password=secret
//! ```
//!
//! Connection parameters can also come from the environment (`SFTP_HOST`,
//! `SFTP_USERNAME`, `SFTP_PASSWORD`, ...).

pub mod config;
pub mod echo;
pub mod error;
pub mod listing;
pub mod server;
pub mod sftp;

// Re-exports for convenience
pub use config::{Args, Config};
pub use error::{GatewayError, Result};
pub use listing::{normalize_path, DirEntry, DirectoryLister, DirectoryListing};
pub use server::{router, AppState};
pub use sftp::{SftpConfig, SftpLister};
