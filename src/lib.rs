//! Taco RPC: a small `Service.Method` RPC protocol over HTTP POST.
//!
//! Requests are JSON payloads posted to `<base>Service.Method`; responses are
//! JSON envelopes carrying either the payload fields or an in-band `error`.
//! See [`rpc`] for the transport and dispatch core and [`taco`] for the
//! service built on top of it.

pub mod config;
pub mod discovery;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod rpc;
pub mod taco;

pub use config::TacoConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use rpc::{Client, Context, DispatchTable, RpcError};
