//! # HTTP Server
//!
//! Main HTTP server combining all endpoint routers.
//!
//! Owns the store for the lifetime of the process and injects it into the
//! handlers through router state.

use std::sync::Arc;

use axum::http::StatusCode;
use axum::Router;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::timeout::{RequestBodyTimeoutLayer, TimeoutLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use super::config::HttpServerConfig;
use super::observability_routes::{health_routes, observability_routes};
use super::todo_routes::{todo_routes, TodoState};
use crate::observability::MetricsRegistry;
use crate::store::TodoStore;

/// HTTP Server for the todo API
pub struct HttpServer {
    config: HttpServerConfig,
    state: Arc<TodoState>,
    router: Router,
}

impl HttpServer {
    /// Create a new HTTP server with default configuration
    pub fn new() -> Self {
        Self::with_config(HttpServerConfig::default())
    }

    /// Create a new HTTP server with custom configuration
    pub fn with_config(config: HttpServerConfig) -> Self {
        Self::with_store(config, TodoStore::new())
    }

    /// Create a server around an existing store.
    ///
    /// The store is seeded here when `config.seed` is set; a seeding failure
    /// is logged and otherwise ignored.
    pub fn with_store(config: HttpServerConfig, store: TodoStore) -> Self {
        if config.seed {
            match store.populate() {
                Ok(()) => info!(count = store.count(), "store seeded"),
                Err(e) => warn!(error = %e, "store not seeded"),
            }
        }

        let state = Arc::new(TodoState::new(
            Arc::new(store),
            Arc::new(MetricsRegistry::new()),
        ));
        let router = Self::build_router(&config, state.clone());

        Self {
            config,
            state,
            router,
        }
    }

    /// Build the combined router with all endpoints
    fn build_router(config: &HttpServerConfig, state: Arc<TodoState>) -> Router {
        let router = Router::new()
            // Health check at root level
            .merge(health_routes())
            .nest("/observability", observability_routes(state.metrics.clone()))
            .merge(todo_routes(state));

        Self::with_middleware(router, config)
    }

    /// Wrap `router` in the server-boundary middleware, outermost first:
    /// panic recovery, request tracing, response deadline, body read deadline.
    pub(crate) fn with_middleware(router: Router, config: &HttpServerConfig) -> Router {
        router.layer(
            ServiceBuilder::new()
                .layer(CatchPanicLayer::new())
                .layer(TraceLayer::new_for_http())
                .layer(TimeoutLayer::with_status_code(
                    StatusCode::REQUEST_TIMEOUT,
                    config.write_timeout(),
                ))
                .layer(RequestBodyTimeoutLayer::new(config.read_timeout())),
        )
    }

    /// Get the socket address
    pub fn socket_addr(&self) -> String {
        self.config.socket_addr()
    }

    /// Shared handler state (store and metrics)
    pub fn state(&self) -> Arc<TodoState> {
        self.state.clone()
    }

    /// Get the router (for testing)
    pub fn router(self) -> Router {
        self.router
    }

    /// Start the HTTP server (async)
    ///
    /// Returns only when the listener cannot be bound, serving fails, or a
    /// Ctrl-C shutdown completes.
    pub async fn start(self) -> Result<(), std::io::Error> {
        let addr = self.config.socket_addr();
        let listener = TcpListener::bind(&addr).await?;

        info!("Starting todo server at http://{}", addr);
        info!("Health check: http://{}/health", addr);
        info!("API endpoints:");
        info!("  GET    /todo       - List todos");
        info!("  GET    /todo/{{id}}  - Get a todo");
        info!("  POST   /todo       - Create a todo");
        info!("  PUT    /todo/{{id}}  - Update a todo");
        info!("  DELETE /todo/{{id}}  - Delete a todo");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        info!("Todo server stopped");
        Ok(())
    }
}

impl Default for HttpServer {
    fn default() -> Self {
        Self::new()
    }
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Shutdown signal received"),
        Err(e) => {
            warn!(error = %e, "failed to install Ctrl-C handler, serving until killed");
            std::future::pending::<()>().await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use axum::body::Body;
    use axum::http::Request;
    use axum::routing::get;
    use tower::ServiceExt;

    use crate::store::SEED_COUNT;

    fn get_request(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    #[test]
    fn test_server_creation() {
        let server = HttpServer::new();
        assert_eq!(server.socket_addr(), "0.0.0.0:3000");
    }

    #[test]
    fn test_server_with_custom_port() {
        let config = HttpServerConfig::with_port(8080);
        let server = HttpServer::with_config(config);
        assert_eq!(server.socket_addr(), "0.0.0.0:8080");
    }

    #[test]
    fn test_seeding_follows_config() {
        let seeded = HttpServer::with_config(HttpServerConfig::default());
        assert_eq!(seeded.state().store.count(), SEED_COUNT);

        let config = HttpServerConfig {
            seed: false,
            ..Default::default()
        };
        let empty = HttpServer::with_config(config);
        assert_eq!(empty.state().store.count(), 0);
    }

    #[test]
    fn test_seeding_skipped_for_non_empty_store() {
        let store = TodoStore::new();
        store.add(crate::store::Todo::new("existing", ""));

        let server = HttpServer::with_store(HttpServerConfig::default(), store);
        assert_eq!(server.state().store.count(), 1);
    }

    #[tokio::test]
    async fn test_health_routes_mounted() {
        for uri in ["/health", "/observability/health", "/observability/metrics"] {
            let response = HttpServer::new()
                .router()
                .oneshot(get_request(uri))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::OK, "{}", uri);
        }
    }

    #[tokio::test]
    async fn test_panic_becomes_internal_error() {
        async fn panicking_handler() -> &'static str {
            panic!("handler panicked")
        }

        let router = Router::new().route("/panic", get(panicking_handler));
        let app = HttpServer::with_middleware(router, &HttpServerConfig::default());

        let response = app.oneshot(get_request("/panic")).await.unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_slow_handler_times_out() {
        let router = Router::new().route(
            "/slow",
            get(|| async {
                tokio::time::sleep(Duration::from_secs(30)).await;
                "done"
            }),
        );
        let config = HttpServerConfig {
            write_timeout_secs: 1,
            ..Default::default()
        };
        let app = HttpServer::with_middleware(router, &config);

        let response = app.oneshot(get_request("/slow")).await.unwrap();

        assert_eq!(response.status(), StatusCode::REQUEST_TIMEOUT);
    }
}
