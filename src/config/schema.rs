//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the taco
//! server and client. All types derive Serde traits for deserialization from
//! config files.

use serde::{Deserialize, Serialize};

use crate::rpc::DEFAULT_BASE_PATH;

/// Root configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct TacoConfig {
    /// RPC server settings.
    pub server: ServerConfig,

    /// RPC client settings.
    pub client: ClientConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// RPC server configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,

    /// Path prefix RPC methods are mounted under. Starts and ends with `/`.
    pub base_path: String,

    /// Request timeout (read, handle, write) in seconds.
    pub request_timeout_secs: u64,

    /// Largest accepted request body in bytes.
    pub max_body_bytes: usize,

    /// Log the User-Agent of every RPC request.
    pub log_user_agents: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
            base_path: DEFAULT_BASE_PATH.to_string(),
            request_timeout_secs: 30,
            max_body_bytes: 1024 * 1024,
            log_user_agents: true,
        }
    }
}

/// RPC client configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Explicit base address, e.g. "http://localhost:8080/oto/".
    /// When unset the address is discovered from the platform.
    pub remote_host: Option<String>,

    /// Service name used for in-cluster discovery.
    pub service_host: String,

    /// Transport timeout in seconds.
    pub timeout_secs: u64,

    /// Print request traces through the client's debug sink.
    pub debug: bool,

    /// Honour HTTP(S)_PROXY environment variables.
    pub system_proxy: bool,

    /// Bind address for `taco-client serve`.
    pub listen_address: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            remote_host: None,
            service_host: "tacoserver".to_string(),
            timeout_secs: 10,
            debug: false,
            system_proxy: true,
            listen_address: "0.0.0.0:8081".to_string(),
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is unset.
    pub log_filter: String,

    /// Emit JSON log lines instead of the pretty format.
    pub json_logs: bool,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_filter: "taco_rpc=info,tower_http=info".to_string(),
            json_logs: false,
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = TacoConfig::default();
        assert_eq!(config.server.bind_address, "0.0.0.0:8080");
        assert_eq!(config.server.base_path, "/oto/");
        assert_eq!(config.client.timeout_secs, 10);
        assert!(config.client.remote_host.is_none());
        assert!(!config.observability.metrics_enabled);
    }

    #[test]
    fn test_partial_toml() {
        let config: TacoConfig = toml::from_str(
            r#"
            [server]
            bind_address = "127.0.0.1:9000"

            [client]
            remote_host = "http://tacos.internal/oto/"
            debug = true
            "#,
        )
        .unwrap();
        assert_eq!(config.server.bind_address, "127.0.0.1:9000");
        assert_eq!(config.server.request_timeout_secs, 30);
        assert_eq!(config.client.remote_host.as_deref(), Some("http://tacos.internal/oto/"));
        assert!(config.client.debug);
    }
}
