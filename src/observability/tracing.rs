//! Distributed tracing backend.
//!
//! # Responsibilities
//! - Build the OpenTelemetry tracer provider from `TracingConfig`
//! - Export finished spans to the collector over OTLP/HTTP
//! - Flush pending spans on shutdown
//!
//! # Design Decisions
//! - Spans are batched and exported from a background worker; an unreachable
//!   collector never blocks or fails a request
//! - Parent-based sampling: upstream decisions are honored, new traces are
//!   sampled by `sampler_ratio`
//! - The tracer is a handle passed to the server, not a process global

use opentelemetry::trace::TracerProvider as _;
use opentelemetry::KeyValue;
use opentelemetry_otlp::{ExporterBuildError, SpanExporter, WithExportConfig};
use opentelemetry_sdk::trace::{Sampler, SdkTracerProvider};
use opentelemetry_sdk::Resource;
use thiserror::Error;

use crate::config::TracingConfig;
use crate::observability::span::RequestTracer;

#[derive(Debug, Error)]
pub enum TelemetryError {
    #[error("Failed to build span exporter: {0}")]
    Exporter(#[from] ExporterBuildError),
}

/// Owns the tracer provider for the lifetime of the process.
pub struct Telemetry {
    provider: SdkTracerProvider,
    service_name: String,
    log_spans: bool,
}

impl Telemetry {
    /// Tracer handle for request handlers.
    pub fn request_tracer(&self) -> RequestTracer {
        RequestTracer::new(self.provider.tracer(self.service_name.clone()))
            .with_span_logging(self.log_spans)
    }

    /// Flush buffered spans and stop the exporter.
    pub fn shutdown(self) {
        if let Err(e) = self.provider.shutdown() {
            tracing::warn!(error = %e, "Tracer provider shutdown failed");
        }
    }
}

/// Build the tracer provider described by the config.
///
/// Must be called outside the async runtime: the OTLP exporter uses a
/// blocking HTTP client on its own worker thread.
pub fn init_tracer(config: &TracingConfig) -> Result<Telemetry, TelemetryError> {
    let resource = Resource::builder()
        .with_service_name(config.service_name.clone())
        .with_attribute(KeyValue::new(
            "service.version",
            config.service_version.clone(),
        ))
        .build();

    let sampler = Sampler::ParentBased(Box::new(Sampler::TraceIdRatioBased(
        config.sampler_ratio,
    )));

    let builder = SdkTracerProvider::builder()
        .with_resource(resource)
        .with_sampler(sampler);

    let provider = if config.enabled {
        let endpoint = config.collector_endpoint();
        let exporter = SpanExporter::builder()
            .with_http()
            .with_endpoint(endpoint.clone())
            .build()?;

        tracing::info!(endpoint = %endpoint, "Span export enabled");
        builder.with_batch_exporter(exporter).build()
    } else {
        tracing::info!("Span export disabled");
        builder.build()
    };

    Ok(Telemetry {
        provider,
        service_name: config.service_name.clone(),
        log_spans: config.log_spans,
    })
}
