//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML, path from TACO_CONFIG)
//!     → loader.rs (parse & deserialize)
//!     → loader.rs (PORT / TACO_REMOTE_HOST overrides)
//!     → validation.rs (semantic checks)
//!     → TacoConfig (validated, immutable)
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, load_from_env, ConfigError};
pub use schema::{ClientConfig, ObservabilityConfig, ServerConfig, TacoConfig};
pub use validation::{validate_config, ValidationError};
