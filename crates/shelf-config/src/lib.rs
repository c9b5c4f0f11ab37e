//! Configuration management for Shelf.
//!
//! Parses `shelf.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! String configuration values support environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields:
//! - `server.host`
//! - `docs.source_dir`
//! - `docs.general_label`
//!
//! ## Durations
//!
//! `server.request_timeout` and `docs.cache_ttl` take strings such as
//! `"15s"`, `"5m"` or `"1m30s"` (see [`parse_duration`]).

mod duration;
mod expand;

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub use duration::{DurationError, parse_duration};

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override server host.
    pub host: Option<String>,
    /// Override server port.
    pub port: Option<u16>,
    /// Override docs source directory.
    pub source_dir: Option<PathBuf>,
    /// Override section cache TTL.
    pub cache_ttl: Option<Duration>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "shelf.toml";

const DEFAULT_SOURCE_DIR: &str = "docs";
const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(5 * 60);
const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(15);
const DEFAULT_GENERAL_LABEL: &str = "General";

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Server configuration.
    pub server: ServerConfig,
    /// Documents configuration (raw strings from TOML).
    docs: DocsConfigRaw,

    /// Resolved docs configuration (set after loading).
    #[serde(skip)]
    pub docs_resolved: DocsConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Server configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Server host address.
    pub host: String,
    /// Server port.
    pub port: u16,
    /// Maximum time to answer a request (resolved from `request_timeout`).
    #[serde(skip)]
    pub request_timeout: Duration,
    #[serde(rename = "request_timeout")]
    request_timeout_raw: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_owned(),
            port: 8080,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            request_timeout_raw: None,
        }
    }
}

/// Raw docs configuration as parsed from TOML.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct DocsConfigRaw {
    source_dir: Option<String>,
    cache_ttl: Option<String>,
    general_label: Option<String>,
}

/// Resolved documents configuration.
#[derive(Debug)]
pub struct DocsConfig {
    /// Documents root.
    pub source_dir: PathBuf,
    /// How long a scan of the documents root is reused. Zero disables caching.
    pub cache_ttl: Duration,
    /// Heading of the section holding root-level documents.
    pub general_label: String,
}

impl Default for DocsConfig {
    fn default() -> Self {
        Self {
            source_dir: PathBuf::from(DEFAULT_SOURCE_DIR),
            cache_ttl: DEFAULT_CACHE_TTL,
            general_label: DEFAULT_GENERAL_LABEL.to_owned(),
        }
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`server.host`").
        field: String,
        /// Error message (e.g., "${`SHELF_HOST`} not set").
        message: String,
    },
    /// Unparseable duration string.
    #[error("Invalid duration in {field}: {value:?} (expected e.g. \"90s\", \"5m\", \"1h30m\")")]
    Duration {
        /// Config field path (e.g., "`docs.cache_ttl`").
        field: String,
        /// Value as written in the file.
        value: String,
    },
}

/// Parse an optional duration field, falling back to `default`.
fn resolve_duration(
    value: Option<&str>,
    field: &str,
    default: Duration,
) -> Result<Duration, ConfigError> {
    value.map_or(Ok(default), |v| {
        parse_duration(v).map_err(|_| ConfigError::Duration {
            field: field.to_owned(),
            value: v.to_owned(),
        })
    })
}

impl Config {
    /// Load configuration, then apply CLI overrides.
    ///
    /// An explicit `config_path` must exist. Without one, the nearest
    /// `shelf.toml` in the current directory or its ancestors is used, and
    /// built-in defaults apply when there is none.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, or if reading,
    /// parsing, expansion or validation fails.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let file = match config_path {
            Some(path) if !path.exists() => {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Some(path) => Some(path.to_path_buf()),
            None => Self::discover_config(),
        };

        let mut config = match file {
            Some(path) => Self::load_from_file(&path)?,
            None => Self::default_with_base(&std::env::current_dir().unwrap_or_default()),
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
            config.validate()?;
        }

        Ok(config)
    }

    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        let CliSettings {
            host,
            port,
            source_dir,
            cache_ttl,
        } = settings;

        if let Some(host) = host {
            self.server.host.clone_from(host);
        }
        if let Some(port) = *port {
            self.server.port = port;
        }
        if let Some(dir) = source_dir {
            self.docs_resolved.source_dir.clone_from(dir);
        }
        if let Some(ttl) = *cache_ttl {
            self.docs_resolved.cache_ttl = ttl;
        }
    }

    /// Nearest `shelf.toml` walking up from the current directory.
    fn discover_config() -> Option<PathBuf> {
        let cwd = std::env::current_dir().ok()?;
        cwd.ancestors()
            .map(|dir| dir.join(CONFIG_FILENAME))
            .find(|candidate| candidate.is_file())
    }

    /// Defaults with the documents root under `base`.
    fn default_with_base(base: &Path) -> Self {
        Self {
            server: ServerConfig::default(),
            docs: DocsConfigRaw::default(),
            docs_resolved: DocsConfig {
                source_dir: base.join(DEFAULT_SOURCE_DIR),
                ..DocsConfig::default()
            },
            config_path: None,
        }
    }

    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&text)?;

        // Expansion may produce relative paths, so it runs before resolution
        config.expand_env_vars()?;
        config.resolve(path.parent().unwrap_or(Path::new(".")))?;
        config.config_path = Some(path.to_path_buf());
        config.validate()?;

        Ok(config)
    }

    /// Check server settings.
    ///
    /// Runs after loading a file and again after CLI overrides.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` naming the first invalid field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let problem = if self.server.host.trim().is_empty() {
            Some("server.host cannot be empty")
        } else if self.server.port == 0 {
            // Port 0 would bind a random port nobody can find
            Some("server.port must be between 1 and 65535")
        } else if self.server.request_timeout.is_zero() {
            Some("server.request_timeout must be greater than 0")
        } else {
            None
        };

        problem.map_or(Ok(()), |p| Err(ConfigError::Validation(p.to_owned())))
    }

    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        self.server.host = expand::expand_env(&self.server.host, "server.host")?;

        let docs = &mut self.docs;
        for (value, field) in [
            (&mut docs.source_dir, "docs.source_dir"),
            (&mut docs.general_label, "docs.general_label"),
        ] {
            if let Some(raw) = value.as_deref() {
                *value = Some(expand::expand_env(raw, field)?);
            }
        }

        Ok(())
    }

    /// Resolve the documents root against the config directory and parse
    /// durations.
    fn resolve(&mut self, config_dir: &Path) -> Result<(), ConfigError> {
        self.server.request_timeout = resolve_duration(
            self.server.request_timeout_raw.as_deref(),
            "server.request_timeout",
            DEFAULT_REQUEST_TIMEOUT,
        )?;

        let raw = &self.docs;
        self.docs_resolved = DocsConfig {
            source_dir: config_dir.join(raw.source_dir.as_deref().unwrap_or(DEFAULT_SOURCE_DIR)),
            cache_ttl: resolve_duration(
                raw.cache_ttl.as_deref(),
                "docs.cache_ttl",
                DEFAULT_CACHE_TTL,
            )?,
            general_label: raw
                .general_label
                .clone()
                .unwrap_or_else(|| DEFAULT_GENERAL_LABEL.to_owned()),
        };

        Ok(())
    }
}
