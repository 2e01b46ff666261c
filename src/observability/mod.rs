//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! RPC client and server produce:
//!     → logging.rs (structured log events via `tracing`)
//!     → metrics.rs (counters and histograms via `metrics`)
//!
//! Consumers:
//!     → stdout (pretty or JSON)
//!     → Prometheus scrape endpoint (optional)
//! ```
//!
//! # Design Decisions
//! - Structured fields, never formatted strings, for method and status
//! - Metrics are cheap no-ops until an exporter is installed
//! - The client's debug sink is separate from logging and opt-in

pub mod logging;
pub mod metrics;
