//! SFTP connection parameters

/// SFTP connection configuration
#[derive(Debug, Clone)]
pub struct SftpConfig {
    /// Remote hostname or IP address
    pub host: String,

    /// SFTP port (default: 22)
    pub port: u16,

    /// Username for authentication
    pub username: String,

    /// Password for password authentication
    pub password: Option<String>,

    /// Private key content (not path!) for key authentication
    pub private_key: Option<String>,
}

impl SftpConfig {
    /// Create a new SFTP configuration with minimal required fields
    pub fn new(host: impl Into<String>, username: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            port: 22,
            username: username.into(),
            password: None,
            private_key: None,
        }
    }

    /// Set the SFTP port
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Set password authentication
    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    /// Set private key authentication (key content, not path)
    pub fn with_private_key(mut self, key: impl Into<String>) -> Self {
        self.private_key = Some(key.into());
        self
    }

    /// "host:port" address string for the TCP connect
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sftp_config_builder() {
        let config = SftpConfig::new("192.168.1.1", "admin")
            .with_port(2222)
            .with_password("secret");

        assert_eq!(config.host, "192.168.1.1");
        assert_eq!(config.port, 2222);
        assert_eq!(config.username, "admin");
        assert_eq!(config.password, Some("secret".to_string()));
        assert!(config.private_key.is_none());
    }

    #[test]
    fn test_addr() {
        let config = SftpConfig::new("sftp.example.com", "deploy");
        assert_eq!(config.addr(), "sftp.example.com:22");
        assert_eq!(config.with_port(2022).addr(), "sftp.example.com:2022");
    }
}
