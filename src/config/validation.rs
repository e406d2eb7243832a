//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, ports valid, ratios bounded)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ServiceConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;
use thiserror::Error;

use crate::config::schema::ServiceConfig;

/// A single semantic problem found in a configuration.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("listener.bind_address `{0}` is not a socket address")]
    BindAddress(String),

    #[error("timeouts.request_secs must be greater than zero")]
    RequestTimeout,

    #[error("observability.metrics_address `{0}` is not a socket address")]
    MetricsAddress(String),

    #[error("tracing.sampler_ratio {0} is outside [0, 1]")]
    SamplerRatio(f64),

    #[error("tracing.agent_port must not be zero")]
    AgentPort,

    #[error("tracing.{0} must not be empty")]
    Empty(&'static str),
}

/// Check a configuration, collecting every problem found.
pub fn validate_config(config: &ServiceConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::BindAddress(
            config.listener.bind_address.clone(),
        ));
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::RequestTimeout);
    }

    if config.observability.metrics_enabled
        && config
            .observability
            .metrics_address
            .parse::<SocketAddr>()
            .is_err()
    {
        errors.push(ValidationError::MetricsAddress(
            config.observability.metrics_address.clone(),
        ));
    }

    let tracing = &config.tracing;
    if !(0.0..=1.0).contains(&tracing.sampler_ratio) {
        errors.push(ValidationError::SamplerRatio(tracing.sampler_ratio));
    }
    if tracing.agent_port == 0 {
        errors.push(ValidationError::AgentPort);
    }
    if tracing.service_name.trim().is_empty() {
        errors.push(ValidationError::Empty("service_name"));
    }
    if tracing.agent_host.trim().is_empty() {
        errors.push(ValidationError::Empty("agent_host"));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
