//! SFTP client module
//!
//! Request-scoped SFTP sessions: connect, authenticate, list one directory,
//! disconnect. The wire protocol and authentication handshake are delegated
//! to `russh` and `russh-sftp`.

pub mod config;
pub mod session;

// Re-exports
pub use config::SftpConfig;
pub use session::{SftpLister, SftpSession};
