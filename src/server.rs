//! HTTP surface
//!
//! Routes, shared state, and the request handlers. Each handler is a single
//! linear sequence: normalize input, call the collaborator, format the
//! response (or map the failure to a status).

use std::sync::Arc;
use std::time::Instant;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use crate::config::Config;
use crate::echo::fetch_outbound_ip;
use crate::listing::{normalize_path, DirectoryLister, DirectoryListing};

/// Shared application state
pub struct AppState {
    /// Source of remote directory listings
    pub lister: Arc<dyn DirectoryLister>,

    /// Shared outbound HTTP client
    pub http: reqwest::Client,

    /// IP-lookup URL for the echo handler
    pub echo_url: String,

    /// Remote host name, echoed in the listing header
    pub remote_host: String,

    /// Server start time
    pub start_time: Instant,
}

impl AppState {
    /// Create app state from the validated config and a lister
    pub fn new(config: &Config, lister: Arc<dyn DirectoryLister>) -> Self {
        Self {
            lister,
            http: reqwest::Client::new(),
            echo_url: config.echo_url.clone(),
            remote_host: config.host.clone(),
            start_time: Instant::now(),
        }
    }
}

/// Build the router
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/ipEcho", get(ip_echo))
        .route("/sftpListDir", get(list_directory_root))
        .route("/sftpListDir/{*path}", get(list_directory))
        .route("/health", get(health))
        .route("/status", get(server_status))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

/// GET /ipEcho — echo the outbound IP as seen by the lookup service
async fn ip_echo(State(state): State<Arc<AppState>>) -> Response {
    match fetch_outbound_ip(&state.http, &state.echo_url).await {
        Ok(body) => (StatusCode::OK, body).into_response(),
        Err(e) => {
            error!("IP echo failed: {}", e);
            e.into_response()
        }
    }
}

/// GET /sftpListDir — list the remote root directory
async fn list_directory_root(State(state): State<Arc<AppState>>) -> Response {
    list_directory_at(state, "").await
}

/// GET /sftpListDir/{*path} — list a remote directory
async fn list_directory(State(state): State<Arc<AppState>>, Path(path): Path<String>) -> Response {
    list_directory_at(state, &path).await
}

async fn list_directory_at(state: Arc<AppState>, raw: &str) -> Response {
    // Route params do not start with "/"; no param means the root path.
    let path = normalize_path(raw);
    info!("Listing remote directory {}", path);

    match state.lister.list(&path).await {
        Ok(entries) => {
            let listing = DirectoryListing::from_entries(entries);
            info!(
                "Listed {} subdirectories and {} files in {}",
                listing.directories().len(),
                listing.files().len(),
                path
            );
            (StatusCode::OK, listing.render(&state.remote_host, &path)).into_response()
        }
        Err(e) => {
            error!("Directory listing failed for {}: {}", path, e);
            e.into_response()
        }
    }
}

/// GET /health
async fn health() -> &'static str {
    "OK"
}

#[derive(Debug, Serialize)]
struct ServerStatus {
    status: String,
    uptime_seconds: u64,
    remote_host: String,
}

/// GET /status
async fn server_status(State(state): State<Arc<AppState>>) -> Json<ServerStatus> {
    Json(ServerStatus {
        status: "running".to_string(),
        uptime_seconds: state.start_time.elapsed().as_secs(),
        remote_host: state.remote_host.clone(),
    })
}
