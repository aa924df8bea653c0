//! HTTP Server Configuration
//!
//! Bind address, server-boundary timeouts and startup seeding.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// HTTP server configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpServerConfig {
    /// Host to bind to (default: "0.0.0.0")
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind to (default: 3000)
    #[serde(default = "default_port")]
    pub port: u16,

    /// Deadline for reading a request body, in seconds (default: 5)
    #[serde(default = "default_read_timeout_secs")]
    pub read_timeout_secs: u64,

    /// Deadline for producing a full response, in seconds (default: 10)
    #[serde(default = "default_write_timeout_secs")]
    pub write_timeout_secs: u64,

    /// Seed the store with example todos on startup (default: true)
    #[serde(default = "default_seed")]
    pub seed: bool,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_read_timeout_secs() -> u64 {
    5
}

fn default_write_timeout_secs() -> u64 {
    10
}

fn default_seed() -> bool {
    true
}

impl Default for HttpServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            read_timeout_secs: default_read_timeout_secs(),
            write_timeout_secs: default_write_timeout_secs(),
            seed: default_seed(),
        }
    }
}

impl HttpServerConfig {
    /// Create a new config with specified port
    pub fn with_port(port: u16) -> Self {
        Self {
            port,
            ..Default::default()
        }
    }

    /// Get the socket address string
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn read_timeout(&self) -> Duration {
        Duration::from_secs(self.read_timeout_secs)
    }

    pub fn write_timeout(&self) -> Duration {
        Duration::from_secs(self.write_timeout_secs)
    }
}
