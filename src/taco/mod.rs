//! TacoService: the one RPC service this crate ships.
//!
//! # Data Flow
//! ```text
//! TacoServiceClient::eat_taco
//!     → rpc::Client::call("TacoService", "EatTaco")
//!     → HTTP
//!     → register_taco_service handler
//!     → TacoService::eat_taco (TacoCounter)
//! ```

pub mod client;
pub mod server;
pub mod service;
pub mod types;

pub use client::TacoServiceClient;
pub use server::{register_taco_service, TacoService};
pub use service::{TacoCounter, TacoError};
pub use types::{EatTacoRequest, EatTacoResponse};

/// Service name on the wire.
pub const SERVICE: &str = "TacoService";

/// `EatTaco` method name on the wire.
pub const EAT_TACO: &str = "EatTaco";
