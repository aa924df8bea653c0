//! # HTTP Server Module
//!
//! Axum server exposing the todo store over JSON.
//!
//! # Endpoints
//!
//! - `/health` - Health check
//! - `/todo`, `/todo/{id}` - Todo CRUD
//! - `/observability/*` - Health and metrics

pub mod config;
pub mod errors;
pub mod observability_routes;
pub mod server;
pub mod todo_routes;

pub use config::HttpServerConfig;
pub use errors::{ApiError, ApiResult};
pub use server::HttpServer;
pub use todo_routes::TodoState;
