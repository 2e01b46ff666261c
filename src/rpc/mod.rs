//! RPC transport and dispatch subsystem.
//!
//! # Data Flow
//! ```text
//! Client side:
//!     typed request
//!     → envelope.rs (serialize payload)
//!     → client.rs (POST <base>Service.Method, Accept-Encoding: gzip)
//!     → compress.rs (gunzip when Content-Encoding declares it)
//!     → envelope.rs (decode payload or in-band error)
//!
//! Server side:
//!     POST <base>Service.Method
//!     → dispatch.rs (route final path segment, read body, build Context)
//!     → handler.rs (decode request, invoke business method, encode envelope)
//!     → compress.rs (gzip when Accept-Encoding allows it)
//! ```
//!
//! # Design Decisions
//! - Business failures travel in-band: HTTP 200 with `{"error": "..."}`
//! - HTTP status is reserved for routing and decode failures
//! - Dispatch table is built once and frozen behind an `Arc`
//! - No retries here; callers own their retry policy

pub mod client;
pub mod compress;
pub mod context;
pub mod dispatch;
pub mod envelope;
pub mod error;
pub mod handler;

pub use client::{Client, DebugSink};
pub use context::{Context, ContextError};
pub use dispatch::{DispatchTable, MethodId, RpcRequest};
pub use envelope::{ErrorEnvelope, ResponseEnvelope};
pub use error::{DispatchError, RpcError, TransportError};
pub use handler::handle;

/// Content type for request and response envelopes.
pub const CONTENT_TYPE_JSON: &str = "application/json";

/// Content type written on server responses.
pub const CONTENT_TYPE_JSON_UTF8: &str = "application/json; charset=utf-8";

/// Default mount point for RPC methods.
pub const DEFAULT_BASE_PATH: &str = "/oto/";
