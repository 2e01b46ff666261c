//! Base address discovery for the RPC client.
//!
//! An explicit `client.remote_host` always wins. On Cloud Run (detected by
//! the `K_SERVICE` variable the platform injects) peers are reached by
//! service name; anywhere else the server is assumed to be local.

use crate::config::ClientConfig;

/// Set by Cloud Run in every container.
pub const CLOUD_RUN_ENV: &str = "K_SERVICE";

/// Where the process is running, as far as discovery cares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    CloudRun,
    Local,
}

impl Platform {
    pub fn detect<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        match lookup(CLOUD_RUN_ENV) {
            Some(v) if !v.is_empty() => Platform::CloudRun,
            _ => Platform::Local,
        }
    }
}

/// Pick the client's base address.
pub fn resolve_remote_host<F>(config: &ClientConfig, base_path: &str, lookup: F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(host) = &config.remote_host {
        return host.clone();
    }
    let host = match Platform::detect(lookup) {
        Platform::CloudRun => config.service_host.clone(),
        Platform::Local => "localhost:8080".to_string(),
    };
    tracing::debug!(host = %host, "Discovered RPC host");
    format!("http://{host}{base_path}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_host_wins() {
        let config = ClientConfig {
            remote_host: Some("http://tacos.example/oto/".into()),
            ..ClientConfig::default()
        };
        let host = resolve_remote_host(&config, "/oto/", |_| Some("svc".into()));
        assert_eq!(host, "http://tacos.example/oto/");
    }

    #[test]
    fn test_cloud_run_uses_service_name() {
        let host = resolve_remote_host(&ClientConfig::default(), "/oto/", |k| {
            (k == CLOUD_RUN_ENV).then(|| "taco-client".to_string())
        });
        assert_eq!(host, "http://tacoserver/oto/");
    }

    #[test]
    fn test_local_fallback() {
        let host = resolve_remote_host(&ClientConfig::default(), "/oto/", |_| None);
        assert_eq!(host, "http://localhost:8080/oto/");
    }
}
