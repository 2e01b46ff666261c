//! Configuration loading from disk and environment.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::TacoConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Environment variable naming the config file.
pub const CONFIG_PATH_ENV: &str = "TACO_CONFIG";

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", join(.0))]
    Validation(Vec<ValidationError>),
}

fn join(errors: &[ValidationError]) -> String {
    errors.iter().map(ToString::to_string).collect::<Vec<_>>().join(", ")
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<TacoConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config: TacoConfig = toml::from_str(&content)?;

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Apply `PORT` and `TACO_REMOTE_HOST` overrides.
///
/// `lookup` abstracts the environment so callers and tests can supply their
/// own source.
pub fn apply_env_overrides<F>(config: &mut TacoConfig, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(port) = lookup("PORT").filter(|p| !p.is_empty()) {
        config.server.bind_address = format!("0.0.0.0:{port}");
    }
    if let Some(host) = lookup("TACO_REMOTE_HOST").filter(|h| !h.is_empty()) {
        config.client.remote_host = Some(host);
    }
}

/// Load from `TACO_CONFIG` when set, otherwise defaults; then apply
/// environment overrides and validate.
pub fn load_from_env() -> Result<TacoConfig, ConfigError> {
    let mut config = match std::env::var(CONFIG_PATH_ENV) {
        Ok(path) if !path.is_empty() => load_config(Path::new(&path))?,
        _ => TacoConfig::default(),
    };
    apply_env_overrides(&mut config, |key| std::env::var(key).ok());
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_port_override() {
        let env: HashMap<&str, &str> = [("PORT", "9999")].into();
        let mut config = TacoConfig::default();
        apply_env_overrides(&mut config, |k| env.get(k).map(|v| v.to_string()));
        assert_eq!(config.server.bind_address, "0.0.0.0:9999");
        assert!(config.client.remote_host.is_none());
    }

    #[test]
    fn test_empty_port_ignored() {
        let mut config = TacoConfig::default();
        apply_env_overrides(&mut config, |_| Some(String::new()));
        assert_eq!(config.server.bind_address, "0.0.0.0:8080");
    }

    #[test]
    fn test_load_rejects_invalid_file() {
        let path = std::env::temp_dir().join(format!("taco-config-{}.toml", std::process::id()));
        fs::write(&path, "[server]\nbase_path = \"oto\"\n").unwrap();
        let err = load_config(&path).unwrap_err();
        fs::remove_file(&path).ok();
        assert!(matches!(err, ConfigError::Validation(_)));
        assert!(err.to_string().contains("base_path"));
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_config(Path::new("/definitely/not/here.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
