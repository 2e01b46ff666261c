//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router hosting the RPC dispatch table
//! - Wire up middleware (tracing, timeout, request ID, user agent)
//! - Answer non-RPC paths with a 404 error envelope
//! - Serve until the shutdown signal fires

use std::net::SocketAddr;
use std::time::Duration;

use axum::http::{StatusCode, Uri};
use axum::response::Response;
use axum::{middleware, Router};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::config::ServerConfig;
use crate::http::middleware::user_agent::log_user_agent;
use crate::http::request::{propagate_request_id, set_request_id};
use crate::rpc::handler::error_response;
use crate::rpc::DispatchTable;

/// HTTP server for the RPC endpoint.
pub struct HttpServer {
    router: Router,
    config: ServerConfig,
}

impl HttpServer {
    /// Build the server around a fully registered dispatch table.
    pub fn new(config: ServerConfig, table: DispatchTable) -> Self {
        let router = Self::build_router(&config, table);
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &ServerConfig, table: DispatchTable) -> Router {
        let mut rpc = table.into_router();
        if config.log_user_agents {
            rpc = rpc.layer(middleware::from_fn(log_user_agent));
        }

        Router::new()
            .merge(rpc)
            .fallback(not_found)
            .layer(TimeoutLayer::new(Duration::from_secs(config.request_timeout_secs)))
            .layer(TraceLayer::new_for_http())
            .layer(propagate_request_id())
            .layer(set_request_id())
    }

    /// The router, for in-process use (tests, embedding).
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server, accepting connections on the given listener until
    /// `shutdown` fires.
    pub async fn run(self, listener: TcpListener, mut shutdown: broadcast::Receiver<()>) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            base_path = %self.config.base_path,
            "HTTP server starting"
        );

        let app = self.router.into_make_service_with_connect_info::<SocketAddr>();

        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Draining HTTP server");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }
}

async fn not_found(uri: Uri) -> Response {
    tracing::warn!(path = %uri.path(), "No route matched");
    error_response(StatusCode::NOT_FOUND, &format!("not found: {}", uri.path()), false)
}
