//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, body limit > 0)
//! - Check address and URL shapes
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: TacoConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use thiserror::Error;
use url::Url;

use crate::config::schema::TacoConfig;

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{field}: invalid socket address '{value}'")]
    InvalidAddress { field: &'static str, value: String },

    #[error("server.base_path must start and end with '/', got '{0}'")]
    InvalidBasePath(String),

    #[error("{0} must be greater than zero")]
    Zero(&'static str),

    #[error("client.remote_host: {0}")]
    InvalidRemoteHost(String),
}

/// Check every semantic constraint, collecting all failures.
pub fn validate_config(config: &TacoConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    check_address(&mut errors, "server.bind_address", &config.server.bind_address);
    check_address(&mut errors, "client.listen_address", &config.client.listen_address);
    if config.observability.metrics_enabled {
        check_address(
            &mut errors,
            "observability.metrics_address",
            &config.observability.metrics_address,
        );
    }

    let base = &config.server.base_path;
    if !base.starts_with('/') || !base.ends_with('/') {
        errors.push(ValidationError::InvalidBasePath(base.clone()));
    }

    if config.server.request_timeout_secs == 0 {
        errors.push(ValidationError::Zero("server.request_timeout_secs"));
    }
    if config.server.max_body_bytes == 0 {
        errors.push(ValidationError::Zero("server.max_body_bytes"));
    }
    if config.client.timeout_secs == 0 {
        errors.push(ValidationError::Zero("client.timeout_secs"));
    }

    if let Some(host) = &config.client.remote_host {
        if let Err(e) = check_remote_host(host) {
            errors.push(e);
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_address(errors: &mut Vec<ValidationError>, field: &'static str, value: &str) {
    if value.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidAddress {
            field,
            value: value.to_string(),
        });
    }
}

/// A remote host is an http(s) URL used as a prefix, so it must end in '/'.
pub fn check_remote_host(host: &str) -> Result<(), ValidationError> {
    let url = Url::parse(host).map_err(|e| ValidationError::InvalidRemoteHost(format!("'{host}': {e}")))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ValidationError::InvalidRemoteHost(format!(
            "'{host}': unsupported scheme '{}'",
            url.scheme()
        )));
    }
    if !host.ends_with('/') {
        return Err(ValidationError::InvalidRemoteHost(format!("'{host}' must end with '/'")));
    }
    Ok(())
}
