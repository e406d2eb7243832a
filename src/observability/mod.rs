//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Inbound request headers
//!     → propagation.rs (W3C trace context, if any)
//!     → span.rs (one server span per request: tags, events, finish)
//!     → tracing.rs (tracer provider, batched OTLP export)
//!
//! All subsystems produce:
//!     → logging.rs (structured log events)
//!     → metrics.rs (counters, histograms)
//! ```
//!
//! # Design Decisions
//! - Structured logging for machine parsing
//! - Request ID flows through all log lines of a request
//! - Metrics are cheap and no-ops until an exporter is installed
//! - Span export is fire-and-forget

pub mod logging;
pub mod metrics;
pub mod propagation;
pub mod span;
pub mod tracing;

pub use span::{RequestSpan, RequestTracer};
