//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     Load config → Init logging → Init tracer → Start runtime → Bind listener
//!
//! Shutdown (signals.rs, HttpServer::run):
//!     SIGTERM/SIGINT or caller's future → Stop accepting → Drain → Flush spans
//! ```
//!
//! # Design Decisions
//! - Ordered startup: config first, then observability, then listeners
//! - Fail fast: any startup error is fatal
//! - Spans are flushed after the runtime has stopped

pub mod signals;
pub mod startup;
