//! Outbound IP echo
//!
//! One GET to a public IP-lookup service; the body comes back verbatim so
//! the caller sees exactly what the lookup service saw.

use tracing::debug;

use crate::error::{GatewayError, Result};

/// Fetch the caller-visible outbound IP address
///
/// The upstream body is returned unmodified, whatever its status; this is
/// a plain fetch-and-echo.
pub async fn fetch_outbound_ip(client: &reqwest::Client, url: &str) -> Result<String> {
    debug!("Fetching outbound IP from {}", url);

    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| GatewayError::upstream(e.to_string()))?;

    response
        .text()
        .await
        .map_err(|e| GatewayError::upstream(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Serve one canned response on an ephemeral local port
    fn spawn_one_shot_server(body: &'static str) -> String {
        let server = tiny_http::Server::http("127.0.0.1:0").unwrap();
        let addr = server.server_addr().to_ip().unwrap();
        std::thread::spawn(move || {
            if let Ok(request) = server.recv() {
                let _ = request.respond(tiny_http::Response::from_string(body));
            }
        });
        format!("http://{}", addr)
    }

    #[tokio::test]
    async fn test_echo_returns_upstream_body_verbatim() {
        let url = spawn_one_shot_server("203.0.113.7");
        let client = reqwest::Client::new();

        let body = fetch_outbound_ip(&client, &url).await.unwrap();
        assert_eq!(body, "203.0.113.7");
    }

    #[tokio::test]
    async fn test_echo_fetch_failure_is_upstream_error() {
        let client = reqwest::Client::new();

        // Nothing listens on port 1.
        let result = fetch_outbound_ip(&client, "http://127.0.0.1:1").await;
        match result {
            Err(GatewayError::Upstream(msg)) => assert!(!msg.is_empty()),
            other => panic!("expected upstream error, got {:?}", other),
        }
    }
}
