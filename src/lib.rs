//! todod - an in-memory todo list served over HTTP
//!
//! - [`store`]: the locked record collection and id generation
//! - [`http_server`]: axum routes mapping store outcomes to status codes
//! - [`observability`]: tracing setup and counters
//! - [`cli`]: argument parsing, configuration and the `serve` command

pub mod cli;
pub mod http_server;
pub mod observability;
pub mod store;
