//! Startup orchestration.
//!
//! # Responsibilities
//! - Build the dispatch table from server config
//! - Register every service before traffic is accepted
//! - Hand the frozen table to the HTTP server

use std::sync::Arc;
use std::time::Duration;

use crate::config::ServerConfig;
use crate::http::HttpServer;
use crate::rpc::{DispatchTable, RpcError};
use crate::taco::{register_taco_service, TacoService};

/// Empty dispatch table configured from `config`.
pub fn dispatch_table(config: &ServerConfig) -> DispatchTable {
    DispatchTable::new()
        .with_base_path(config.base_path.clone())
        .with_body_limit(config.max_body_bytes)
        .with_request_timeout(Duration::from_secs(config.request_timeout_secs))
}

/// HTTP server with TacoService registered.
pub fn taco_server<S: TacoService>(config: &ServerConfig, service: S) -> Result<HttpServer, RpcError> {
    let mut table = dispatch_table(config);
    register_taco_service(&mut table, Arc::new(service))?;
    tracing::info!(
        base_path = %table.base_path(),
        methods = ?table.methods(),
        "Services registered"
    );
    Ok(HttpServer::new(config.clone(), table))
}
