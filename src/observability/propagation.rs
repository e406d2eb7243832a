//! Trace context extraction from inbound HTTP headers.
//!
//! # Responsibilities
//! - Decode a W3C `traceparent` / `tracestate` pair from request headers
//! - Report absence as `None`: missing or malformed headers are a normal case
//!
//! # Design Decisions
//! - Extraction starts from an empty context, never the ambient one, so a
//!   request can only become a child of what its own headers carry

use axum::http::HeaderMap;
use opentelemetry::propagation::{Extractor, TextMapPropagator};
use opentelemetry::trace::{SpanContext, TraceContextExt};
use opentelemetry::Context;
use opentelemetry_sdk::propagation::TraceContextPropagator;

pub const TRACEPARENT_HEADER: &str = "traceparent";
pub const TRACESTATE_HEADER: &str = "tracestate";

/// Read-only view of a header map for the propagator.
struct HeaderExtractor<'a>(&'a HeaderMap);

impl Extractor for HeaderExtractor<'_> {
    fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(|v| v.to_str().ok())
    }

    fn keys(&self) -> Vec<&str> {
        self.0.keys().map(|k| k.as_str()).collect()
    }
}

/// Decodes upstream trace contexts.
pub struct TraceContextExtractor {
    propagator: TraceContextPropagator,
}

impl TraceContextExtractor {
    pub fn new() -> Self {
        Self {
            propagator: TraceContextPropagator::new(),
        }
    }

    /// Extract the upstream span context, if the headers carry a valid one.
    pub fn extract(&self, headers: &HeaderMap) -> Option<SpanContext> {
        let cx = self
            .propagator
            .extract_with_context(&Context::new(), &HeaderExtractor(headers));
        let span_context = cx.span().span_context().clone();

        if span_context.is_valid() {
            Some(span_context)
        } else {
            None
        }
    }
}

impl Default for TraceContextExtractor {
    fn default() -> Self {
        Self::new()
    }
}
