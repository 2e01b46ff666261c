//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     Config → Dispatch table (register services) → HttpServer
//!
//! Shutdown (shutdown.rs):
//!     Signal or trigger → broadcast → axum graceful shutdown → Exit
//!
//! Signals (signals.rs):
//!     SIGTERM/SIGINT → Trigger graceful shutdown
//! ```
//!
//! # Design Decisions
//! - Services register before the listener accepts traffic
//! - The dispatch table is frozen once the server is built

pub mod shutdown;
pub mod signals;
pub mod startup;

pub use shutdown::Shutdown;
