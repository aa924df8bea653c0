//! CLI command implementations
//!
//! `serve` resolves configuration (file, then flags), installs logging,
//! builds the tokio runtime and runs the HTTP server until shutdown.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::http_server::{HttpServer, HttpServerConfig};
use crate::observability::{init_logging, DEFAULT_LOG_FILTER};

use super::args::{Cli, Command, ServeArgs};
use super::errors::{CliError, CliResult};

/// Configuration file structure
///
/// Every field is optional; an empty object `{}` yields the defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Server settings (host, port, timeouts, seeding)
    #[serde(flatten)]
    pub server: HttpServerConfig,

    /// Log filter used when RUST_LOG is not set
    #[serde(default)]
    pub log_level: Option<String>,
}

impl Config {
    /// Load configuration from file
    pub fn load(path: &Path) -> CliResult<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| CliError::config_error(format!("Failed to read config: {}", e)))?;

        let config: Config = serde_json::from_str(&content)
            .map_err(|e| CliError::config_error(format!("Invalid config JSON: {}", e)))?;

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration
    fn validate(&self) -> CliResult<()> {
        if self.server.read_timeout_secs == 0 {
            return Err(CliError::config_error("read_timeout_secs must be > 0"));
        }

        if self.server.write_timeout_secs == 0 {
            return Err(CliError::config_error("write_timeout_secs must be > 0"));
        }

        Ok(())
    }

    /// Resolve the configuration for `serve`: the file if one was given,
    /// then command-line overrides.
    pub fn resolve(args: &ServeArgs) -> CliResult<Self> {
        let mut config = match &args.config {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };

        if let Some(port) = args.port {
            config.server.port = port;
        }
        if args.no_seed {
            config.server.seed = false;
        }
        if let Some(level) = &args.log_level {
            config.log_level = Some(level.clone());
        }

        Ok(config)
    }
}

/// Parse the process arguments and run the selected command
pub fn run() -> CliResult<()> {
    run_command(Cli::parse_args().command())
}

/// Run a CLI command
pub fn run_command(command: Command) -> CliResult<()> {
    match command {
        Command::Serve(args) => serve(&args),
    }
}

/// Start the HTTP server and block until it stops
pub fn serve(args: &ServeArgs) -> CliResult<()> {
    let config = Config::resolve(args)?;

    init_logging(config.log_level.as_deref().unwrap_or(DEFAULT_LOG_FILTER));
    info!(addr = %config.server.socket_addr(), seed = config.server.seed, "configuration loaded");

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    runtime.block_on(async move {
        HttpServer::with_config(config.server)
            .start()
            .await
            .map_err(|e| CliError::serve_failed(format!("HTTP server failed: {}", e)))
    })
}
