//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the service.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the inventory service.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
#[serde(default)]
pub struct ServiceConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Logging and metrics settings.
    pub observability: ObservabilityConfig,

    /// Distributed tracing settings.
    pub tracing: TracingConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

impl ListenerConfig {
    /// Replace the port of the bind address, keeping the host part.
    pub fn set_port(&mut self, port: u16) {
        let host = self
            .bind_address
            .rsplit_once(':')
            .map(|(host, _)| host)
            .unwrap_or("0.0.0.0");
        self.bind_address = format!("{}:{}", host, port);
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Total request timeout in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "debug".to_string(),
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}

/// Distributed tracing configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct TracingConfig {
    /// Export spans to the collector. Spans are still created when disabled.
    pub enabled: bool,

    /// Service name reported with every span.
    pub service_name: String,

    /// Service version reported as a resource attribute.
    pub service_version: String,

    /// Collector host.
    pub agent_host: String,

    /// Collector port (OTLP over HTTP).
    pub agent_port: u16,

    /// Fraction of new traces to sample, in [0, 1].
    /// Traces continued from upstream follow the upstream sampling decision.
    pub sampler_ratio: f64,

    /// Log every finished span at debug level.
    pub log_spans: bool,
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            service_name: "inventory-service".to_string(),
            service_version: env!("CARGO_PKG_VERSION").to_string(),
            agent_host: "localhost".to_string(),
            agent_port: 4318,
            sampler_ratio: 1.0,
            log_spans: true,
        }
    }
}

impl TracingConfig {
    /// OTLP/HTTP traces endpoint derived from host and port.
    pub fn collector_endpoint(&self) -> String {
        format!("http://{}:{}/v1/traces", self.agent_host, self.agent_port)
    }
}
