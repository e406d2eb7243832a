//! Configuration loading from disk and the environment.

use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::config::schema::ServiceConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Listening port.
pub const ENV_PORT: &str = "PORT";
/// Log verbosity.
pub const ENV_LOG_LEVEL: &str = "LOG_LEVEL";
/// Tracing collector host.
pub const ENV_AGENT_HOST: &str = "JAEGER_SERVER_HOSTNAME";
/// Tracing collector port.
pub const ENV_AGENT_PORT: &str = "JAEGER_SERVER_PORT";

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid value `{value}` for {var}")]
    Env { var: &'static str, value: String },

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load configuration: defaults, then the optional TOML file, then the
/// process environment. The result is validated before it is returned.
pub fn load_config(path: Option<&Path>) -> Result<ServiceConfig, ConfigError> {
    load_config_with(path, |var| std::env::var(var).ok())
}

/// Same as [`load_config`] with an explicit environment lookup.
pub fn load_config_with<F>(path: Option<&Path>, env: F) -> Result<ServiceConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = match path {
        Some(path) => {
            let content = fs::read_to_string(path)?;
            toml::from_str(&content)?
        }
        None => ServiceConfig::default(),
    };

    apply_env_overrides(&mut config, env)?;
    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

fn apply_env_overrides<F>(config: &mut ServiceConfig, env: F) -> Result<(), ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(value) = env(ENV_PORT) {
        let port = parse_port(ENV_PORT, value)?;
        config.listener.set_port(port);
    }

    if let Some(value) = env(ENV_LOG_LEVEL) {
        config.observability.log_level = value;
    }

    if let Some(value) = env(ENV_AGENT_HOST) {
        config.tracing.agent_host = value;
    }

    if let Some(value) = env(ENV_AGENT_PORT) {
        config.tracing.agent_port = parse_port(ENV_AGENT_PORT, value)?;
    }

    Ok(())
}

fn parse_port(var: &'static str, value: String) -> Result<u16, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::Env { var, value })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |var| map.get(var).cloned()
    }

    #[test]
    fn defaults_without_file_or_env() {
        let config = load_config_with(None, env_of(&[])).unwrap();
        assert_eq!(config, ServiceConfig::default());
    }

    #[test]
    fn environment_overrides_defaults() {
        let config = load_config_with(
            None,
            env_of(&[
                (ENV_PORT, "9000"),
                (ENV_LOG_LEVEL, "info"),
                (ENV_AGENT_HOST, "jaeger.local"),
                (ENV_AGENT_PORT, "14318"),
            ]),
        )
        .unwrap();

        assert_eq!(config.listener.bind_address, "0.0.0.0:9000");
        assert_eq!(config.observability.log_level, "info");
        assert_eq!(config.tracing.agent_host, "jaeger.local");
        assert_eq!(config.tracing.agent_port, 14318);
    }

    #[test]
    fn bad_port_is_rejected() {
        let err = load_config_with(None, env_of(&[(ENV_PORT, "eighty")])).unwrap_err();
        assert!(matches!(err, ConfigError::Env { var: ENV_PORT, .. }));
    }

    #[test]
    fn file_then_environment() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
            [listener]
            bind_address = "127.0.0.1:7000"

            [tracing]
            agent_host = "from-file"
            sampler_ratio = 0.5
            "#
        )
        .unwrap();

        let config =
            load_config_with(Some(file.path()), env_of(&[(ENV_AGENT_HOST, "from-env")])).unwrap();

        assert_eq!(config.listener.bind_address, "127.0.0.1:7000");
        assert_eq!(config.tracing.agent_host, "from-env");
        assert_eq!(config.tracing.sampler_ratio, 0.5);
    }

    #[test]
    fn invalid_file_values_fail_validation() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[timeouts]\nrequest_secs = 0").unwrap();

        let err = load_config_with(Some(file.path()), env_of(&[])).unwrap_err();
        match err {
            ConfigError::Validation(errors) => {
                assert_eq!(errors, vec![ValidationError::RequestTimeout]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = load_config_with(Some(Path::new("/nonexistent/inventory.toml")), env_of(&[]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
