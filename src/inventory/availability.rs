//! Product availability rule.
//!
//! # States
//! - Available: the product id is exactly `"1"`
//! - Unavailable: anything else, including the empty id
//!
//! Each outcome fixes the response status, the response body, the event
//! logged on the request span and the simulated processing time.

use axum::http::StatusCode;
use std::time::Duration;

/// The only product id the inventory holds.
pub const AVAILABLE_PRODUCT_ID: &str = "1";

pub const AVAILABLE_MESSAGE: &str = "Available product found in Inventory";

/// Misspelling kept verbatim; existing clients match on this body.
pub const UNAVAILABLE_MESSAGE: &str = "No available product found in Inventoty";

/// Result of an availability check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Availability {
    Available,
    Unavailable,
}

impl Availability {
    /// Evaluate the availability rule for a product id.
    pub fn of(product_id: &str) -> Self {
        if product_id == AVAILABLE_PRODUCT_ID {
            Availability::Available
        } else {
            Availability::Unavailable
        }
    }

    pub fn is_available(self) -> bool {
        self == Availability::Available
    }

    /// HTTP status returned to the caller.
    pub fn status(self) -> StatusCode {
        match self {
            Availability::Available => StatusCode::OK,
            Availability::Unavailable => StatusCode::NOT_FOUND,
        }
    }

    /// Response body returned to the caller.
    pub fn message(self) -> &'static str {
        match self {
            Availability::Available => AVAILABLE_MESSAGE,
            Availability::Unavailable => UNAVAILABLE_MESSAGE,
        }
    }

    /// Event recorded on the request span.
    pub fn event(self) -> &'static str {
        match self {
            Availability::Available => "Product is available",
            Availability::Unavailable => "Product is not available",
        }
    }

    /// Simulated processing time before the response is sent.
    pub fn processing_delay(self) -> Duration {
        match self {
            Availability::Available => Duration::from_millis(66),
            Availability::Unavailable => Duration::from_millis(77),
        }
    }

    /// Label used for metrics.
    pub fn as_str(self) -> &'static str {
        match self {
            Availability::Available => "available",
            Availability::Unavailable => "unavailable",
        }
    }
}
