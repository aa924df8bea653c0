//! CLI module for the todo service
//!
//! Provides command-line interface for:
//! - serve: Start the HTTP server (the default when no command is given)

mod args;
mod commands;
mod errors;

pub use args::{Cli, Command, ServeArgs};
pub use commands::{run, run_command, serve, Config};
pub use errors::{CliError, CliErrorCode, CliResult};
