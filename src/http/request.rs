//! Request identification.
//!
//! # Responsibilities
//! - Name the request ID header shared by the middleware and the handlers
//! - Read the request ID back for structured logging
//!
//! # Design Decisions
//! - Request ID added as early as possible for tracing (outermost layer)
//! - A client-supplied ID is kept and echoed on the response

use axum::http::{HeaderMap, HeaderName};

pub const X_REQUEST_ID: &str = "x-request-id";

pub fn x_request_id() -> HeaderName {
    HeaderName::from_static(X_REQUEST_ID)
}

/// Request ID carried by the headers, or `"unknown"`.
pub fn request_id(headers: &HeaderMap) -> &str {
    headers
        .get(X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown")
}
