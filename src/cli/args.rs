//! CLI argument definitions using clap
//!
//! Commands:
//! - todod serve [--config <path>] [--port <port>] [--no-seed] [--log-level <filter>]

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// todod - In-memory todo list over HTTP
#[derive(Parser, Debug)]
#[command(name = "todod")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start the HTTP server
    Serve(ServeArgs),
}

#[derive(Args, Debug, Default, Clone)]
pub struct ServeArgs {
    /// Path to a JSON configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Port to listen on (overrides the configuration file)
    #[arg(long)]
    pub port: Option<u16>,

    /// Start with an empty store
    #[arg(long)]
    pub no_seed: bool,

    /// Log filter used when RUST_LOG is not set
    /// (default: the configuration file's, then the built-in filter)
    #[arg(long)]
    pub log_level: Option<String>,
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }

    /// The command to run; `serve` with defaults when none was given
    pub fn command(self) -> Command {
        self.command
            .unwrap_or_else(|| Command::Serve(ServeArgs::default()))
    }
}
