//! Request span lifecycle.
//!
//! # Responsibilities
//! - Start one server span per request, as a child of the upstream context
//!   when one was propagated, or as the root of a new trace
//! - Collect tags (last write per key wins) and timestamped log events
//! - Finish the span exactly once on every path
//!
//! # Design Decisions
//! - `finish` consumes the span, so a second finish does not type-check
//! - A span dropped before `finish` (e.g. the client went away during the
//!   simulated delay) is finished by `Drop`
//! - Tags are buffered and written on finish; the SDK appends duplicate keys

use std::borrow::Cow;
use std::sync::Arc;

use axum::http::HeaderMap;
use opentelemetry::trace::{Span as _, SpanContext, SpanKind, TraceContextExt, TraceId, Tracer as _};
use opentelemetry::{Context, Key, KeyValue, Value};
use opentelemetry_sdk::trace::{SdkTracer, Span};

use crate::observability::propagation::TraceContextExtractor;

/// OpenTracing-style tag keys.
pub const HTTP_URL: &str = "http.url";
pub const HTTP_METHOD: &str = "http.method";
pub const HTTP_STATUS_CODE: &str = "http.status_code";

/// Starts request spans. Cheap to clone; shared through the app state.
#[derive(Clone)]
pub struct RequestTracer {
    tracer: SdkTracer,
    extractor: Arc<TraceContextExtractor>,
    log_spans: bool,
}

impl RequestTracer {
    pub fn new(tracer: SdkTracer) -> Self {
        Self {
            tracer,
            extractor: Arc::new(TraceContextExtractor::new()),
            log_spans: false,
        }
    }

    /// Log every finished span at debug level.
    pub fn with_span_logging(mut self, enabled: bool) -> Self {
        self.log_spans = enabled;
        self
    }

    /// Upstream span context carried by the request headers, if any.
    pub fn extract(&self, headers: &HeaderMap) -> Option<SpanContext> {
        self.extractor.extract(headers)
    }

    /// Start a server span. With a parent the span joins the parent's trace;
    /// without one it begins a new trace.
    pub fn start(&self, name: &'static str, parent: Option<SpanContext>) -> RequestSpan {
        let parent_cx = match parent {
            Some(span_context) => Context::new().with_remote_span_context(span_context),
            None => Context::new(),
        };

        let span = self
            .tracer
            .span_builder(name)
            .with_kind(SpanKind::Server)
            .start_with_context(&self.tracer, &parent_cx);

        RequestSpan {
            name,
            span,
            tags: Vec::new(),
            log_spans: self.log_spans,
            finished: false,
        }
    }
}

/// A span owned by a single request.
pub struct RequestSpan {
    name: &'static str,
    span: Span,
    tags: Vec<KeyValue>,
    log_spans: bool,
    finished: bool,
}

impl RequestSpan {
    pub fn span_context(&self) -> &SpanContext {
        self.span.span_context()
    }

    pub fn trace_id(&self) -> TraceId {
        self.span_context().trace_id()
    }

    /// Attach a tag. Setting the same key again replaces the earlier value.
    pub fn tag(&mut self, key: impl Into<Key>, value: impl Into<Value>) {
        let tag = KeyValue::new(key, value);
        match self.tags.iter_mut().find(|t| t.key == tag.key) {
            Some(existing) => *existing = tag,
            None => self.tags.push(tag),
        }
    }

    /// Append a timestamped event.
    pub fn log(&mut self, event: impl Into<Cow<'static, str>>) {
        self.span.add_event(event, Vec::new());
    }

    /// Seal the span with an end timestamp.
    pub fn finish(mut self) {
        self.seal();
    }

    fn seal(&mut self) {
        if self.finished {
            return;
        }
        self.finished = true;

        let tags = std::mem::take(&mut self.tags);
        if self.log_spans {
            let status = tags
                .iter()
                .find(|t| t.key.as_str() == HTTP_STATUS_CODE)
                .map(|t| t.value.as_str().into_owned())
                .unwrap_or_default();
            tracing::debug!(
                span = self.name,
                trace_id = %self.trace_id(),
                span_id = %self.span_context().span_id(),
                status = %status,
                "Span finished"
            );
        }

        self.span.set_attributes(tags);
        self.span.end();
    }
}

impl Drop for RequestSpan {
    fn drop(&mut self) {
        self.seal();
    }
}
