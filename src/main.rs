//! Taco RPC server.
//!
//! # Architecture Overview
//!
//! ```text
//!                    ┌───────────────────────────────────────────────┐
//!                    │                 TACO SERVER                   │
//!   POST /oto/       │  ┌──────────┐   ┌──────────┐   ┌───────────┐  │
//!   Service.Method ──┼─▶│  http    │──▶│ dispatch │──▶│  handler  │  │
//!                    │  │ server   │   │  table   │   │ (decode)  │  │
//!                    │  └──────────┘   └──────────┘   └─────┬─────┘  │
//!                    │                                      ▼        │
//!                    │                               ┌───────────┐   │
//!   JSON envelope ◀──┼───────────────────────────────│TacoService│   │
//!   (gzip optional)  │                               └───────────┘   │
//!                    │  config · observability · lifecycle           │
//!                    └───────────────────────────────────────────────┘
//! ```

use taco_rpc::config::load_from_env;
use taco_rpc::lifecycle::startup::taco_server;
use taco_rpc::lifecycle::Shutdown;
use taco_rpc::observability::{logging, metrics};
use taco_rpc::taco::TacoCounter;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = load_from_env()?;
    logging::init_tracing(&config.observability)?;

    tracing::info!("taco-server v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.server.bind_address,
        base_path = %config.server.base_path,
        request_timeout_secs = config.server.request_timeout_secs,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(e) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                error = %e,
                "Failed to parse metrics address"
            ),
        }
    }

    let listener = TcpListener::bind(&config.server.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    shutdown.trigger_on_signal();

    let server = taco_server(&config.server, TacoCounter)?;
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
