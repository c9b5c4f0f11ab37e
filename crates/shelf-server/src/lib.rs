//! HTTP server for the Shelf document index.
//!
//! This crate provides an axum server serving:
//! - `/`: the section index as an HTML page
//! - `/api/sections`: the same index as JSON
//! - `/docs/*`: raw document files from the documents root
//! - `/healthz`: liveness probe
//!
//! # Quick Start
//!
//! ```no_run
//! use shelf_server::{ServerConfig, run_server};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ServerConfig {
//!         port: 9000,
//!         ..ServerConfig::default()
//!     };
//!     run_server(config).await
//! }
//! ```
//!
//! # Architecture
//!
//! ```text
//! Browser ──HTTP──► axum router (shelf-server)
//!                        │
//!                        ├─► /, /api/sections ──► spawn_blocking ──► Site (TTL cache)
//!                        │                                             │
//!                        │                                             └─► Scanner (walk + README render)
//!                        │
//!                        └─► /docs/* ──► tower-http ServeDir
//! ```

mod app;
mod error;
mod handlers;
mod middleware;
mod state;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use shelf_site::{DEFAULT_TTL, Site, SiteConfig};
use state::AppState;

pub use error::ServerError;

/// Server configuration.
#[derive(Clone, Debug)]
pub struct ServerConfig {
    /// Host address to bind to.
    pub host: String,
    /// Port to listen on.
    pub port: u16,
    /// Documents root.
    pub source_dir: PathBuf,
    /// How long a scan is reused.
    pub cache_ttl: Duration,
    /// Deadline for each request.
    pub request_timeout: Duration,
    /// Heading of the root-level section.
    pub general_label: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        let site = SiteConfig::default();
        Self {
            host: "127.0.0.1".to_owned(),
            port: 8080,
            source_dir: PathBuf::from("docs"),
            cache_ttl: DEFAULT_TTL,
            request_timeout: Duration::from_secs(15),
            general_label: site.general_label,
        }
    }
}

/// Run the server until Ctrl-C.
///
/// # Errors
///
/// Returns an error if the listener cannot be bound or the server fails.
pub async fn run_server(config: ServerConfig) -> Result<(), Box<dyn std::error::Error>> {
    let site = Arc::new(Site::from_root(
        config.source_dir.clone(),
        SiteConfig {
            ttl: config.cache_ttl,
            general_label: config.general_label.clone(),
            ..SiteConfig::default()
        },
    ));

    let state = Arc::new(AppState {
        site,
        docs_root: config.source_dir.clone(),
    });
    let app = app::create_router(state, config.request_timeout);

    let listener = tokio::net::TcpListener::bind((config.host.as_str(), config.port)).await?;
    tracing::info!(
        address = %listener.local_addr()?,
        source_dir = %config.source_dir.display(),
        cache_ttl_secs = config.cache_ttl.as_secs(),
        "Starting server"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Wait for shutdown signal (Ctrl-C).
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        // Without a signal handler the server runs until killed
        tracing::error!(error = %e, "Failed to install Ctrl-C handler");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received, stopping server...");
}

/// Create server configuration from Shelf config.
#[must_use]
pub fn server_config_from_shelf_config(config: &shelf_config::Config) -> ServerConfig {
    ServerConfig {
        host: config.server.host.clone(),
        port: config.server.port,
        source_dir: config.docs_resolved.source_dir.clone(),
        cache_ttl: config.docs_resolved.cache_ttl,
        request_timeout: config.server.request_timeout,
        general_label: config.docs_resolved.general_label.clone(),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use shelf_config::{CliSettings, Config};

    use super::*;

    #[test]
    fn test_default_config() {
        let config = ServerConfig::default();
        assert_eq!(config.port, 8080);
        assert_eq!(config.cache_ttl, Duration::from_secs(300));
        assert_eq!(config.general_label, "General");
    }

    #[test]
    fn test_server_config_from_shelf_config() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("shelf.toml");
        std::fs::write(
            &path,
            r#"
[server]
host = "0.0.0.0"
request_timeout = "30s"

[docs]
source_dir = "library"
general_label = "Shared"
"#,
        )
        .unwrap();
        let settings = CliSettings {
            port: Some(9000),
            cache_ttl: Some(Duration::from_secs(10)),
            ..Default::default()
        };
        let shelf = Config::load(Some(&path), Some(&settings)).unwrap();

        let config = server_config_from_shelf_config(&shelf);

        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 9000);
        assert_eq!(config.source_dir, temp_dir.path().join("library"));
        assert_eq!(config.cache_ttl, Duration::from_secs(10));
        assert_eq!(config.request_timeout, Duration::from_secs(30));
        assert_eq!(config.general_label, "Shared");
    }
}
