//! HTTP hosting for the RPC dispatch table.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, graceful shutdown)
//!     → request.rs (request ID assigned and echoed)
//!     → middleware/user_agent.rs (log caller)
//!     → rpc::DispatchTable (route <base>Service.Method)
//!     → anything else: 404 error envelope
//! ```

pub mod middleware;
pub mod request;
pub mod server;

pub use request::X_REQUEST_ID;
pub use server::HttpServer;
