//! `shelf serve` command implementation.

use std::path::PathBuf;
use std::time::Duration;

use clap::Args;
use shelf_config::{CliSettings, Config, parse_duration};
use shelf_server::{run_server, server_config_from_shelf_config};

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the serve command.
#[derive(Args)]
pub(crate) struct ServeArgs {
    /// Path to configuration file (default: auto-discover shelf.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Documents root directory (overrides config).
    #[arg(short, long, env = "SHELF_SOURCE_DIR")]
    source_dir: Option<PathBuf>,

    /// Host to bind to (overrides config).
    #[arg(long)]
    host: Option<String>,

    /// Port to bind to (overrides config).
    #[arg(short, long, env = "SHELF_PORT")]
    port: Option<u16>,

    /// How long a scan is reused, e.g. "30s" or "5m"; "0s" disables caching
    /// (overrides config).
    #[arg(long, value_parser = parse_duration)]
    cache_ttl: Option<Duration>,

    /// Enable verbose output (access log and refresh timings).
    #[arg(short, long)]
    pub verbose: bool,
}

impl ServeArgs {
    /// Execute the serve command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails or the server fails to start.
    pub(crate) async fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            host: self.host,
            port: self.port,
            source_dir: self.source_dir,
            cache_ttl: self.cache_ttl,
        };

        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;

        output.info(&format!(
            "Starting server on http://{}:{}",
            config.server.host, config.server.port
        ));
        output.info(&format!(
            "Serving documents from {}",
            config.docs_resolved.source_dir.display()
        ));
        if config.docs_resolved.cache_ttl.is_zero() {
            output.info("Section cache: disabled");
        } else {
            output.info(&format!(
                "Section cache: {}s",
                config.docs_resolved.cache_ttl.as_secs()
            ));
        }
        if !config.docs_resolved.source_dir.is_dir() {
            output.warning(
                "Documents root is not a directory yet; the index will fail until it exists",
            );
        }

        let server_config = server_config_from_shelf_config(&config);
        run_server(server_config)
            .await
            .map_err(|e| CliError::Server(e.to_string()))?;

        Ok(())
    }
}
