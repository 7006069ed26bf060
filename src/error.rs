//! Error types for the SFTP gateway

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

/// Main error type for the SFTP gateway
///
/// Remote faults carry a kind so the HTTP layer can pick a status per
/// failure mode instead of collapsing everything into one code.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// SSH/TCP connection failed or timed out
    #[error("SFTP connection error: {0}")]
    Connection(String),

    /// Authentication rejected by the remote server
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// Remote path does not exist
    #[error("Path not found: {0}")]
    PathNotFound(String),

    /// Remote server denied access to the path
    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    /// Any other remote SFTP operation fault
    #[error("SFTP error: {0}")]
    Remote(String),

    /// Outbound IP-lookup fetch failed
    #[error("Upstream fetch error: {0}")]
    Upstream(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// SSH key parsing error
    #[error("SSH key error: {0}")]
    Key(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias using GatewayError
pub type Result<T> = std::result::Result<T, GatewayError>;

impl GatewayError {
    /// Create a connection error from a string
    pub fn connection(msg: impl Into<String>) -> Self {
        GatewayError::Connection(msg.into())
    }

    /// Create an authentication error from a string
    pub fn auth(msg: impl Into<String>) -> Self {
        GatewayError::Authentication(msg.into())
    }

    /// Create a remote-operation error from a string
    pub fn remote(msg: impl Into<String>) -> Self {
        GatewayError::Remote(msg.into())
    }

    /// Create an upstream fetch error from a string
    pub fn upstream(msg: impl Into<String>) -> Self {
        GatewayError::Upstream(msg.into())
    }

    /// Create a config error from a string
    pub fn config(msg: impl Into<String>) -> Self {
        GatewayError::Config(msg.into())
    }

    /// HTTP status for this failure kind
    pub fn status(&self) -> StatusCode {
        match self {
            GatewayError::PathNotFound(_) => StatusCode::NOT_FOUND,
            GatewayError::PermissionDenied(_) => StatusCode::FORBIDDEN,
            GatewayError::Connection(_)
            | GatewayError::Authentication(_)
            | GatewayError::Remote(_)
            | GatewayError::Upstream(_) => StatusCode::BAD_GATEWAY,
            GatewayError::Config(_) | GatewayError::Key(_) | GatewayError::Io(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        (self.status(), self.to_string()).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = GatewayError::Connection("failed to connect".to_string());
        assert_eq!(err.to_string(), "SFTP connection error: failed to connect");

        let err = GatewayError::PathNotFound("/missing".to_string());
        assert_eq!(err.to_string(), "Path not found: /missing");
    }

    #[test]
    fn test_status_per_kind() {
        assert_eq!(
            GatewayError::PathNotFound("/x".into()).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            GatewayError::PermissionDenied("/x".into()).status(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            GatewayError::auth("rejected").status(),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            GatewayError::connection("refused").status(),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            GatewayError::config("missing host").status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_upstream_status() {
        assert_eq!(
            GatewayError::upstream("connection reset").status(),
            StatusCode::BAD_GATEWAY
        );
    }
}
