//! Request handlers.
//!
//! # Responsibilities
//! - `/health`: liveness probe
//! - `/checkAvailable/{product_id}`: traced availability check
//!
//! # Design Decisions
//! - One span per availability check, finished before the response is built
//! - The simulated processing time is a timer, not a busy wait

use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};
use std::time::Instant;

use crate::http::request::request_id;
use crate::http::server::AppState;
use crate::inventory::Availability;
use crate::observability::metrics;
use crate::observability::span::{HTTP_METHOD, HTTP_STATUS_CODE, HTTP_URL};

pub const HEALTH_MESSAGE: &str = "Inventory Service is alive";

/// Name of the span recorded for each availability check.
pub const SPAN_NAME: &str = "http_server";

/// Route template reported in the `http.url` tag.
pub const CHECK_AVAILABLE_URL_TAG: &str = "/checkAvailable/:productId";

pub const HEALTH_ROUTE: &str = "/health";
pub const CHECK_AVAILABLE_ROUTE: &str = "/checkAvailable/{product_id}";
pub const CHECK_AVAILABLE_EMPTY_ROUTE: &str = "/checkAvailable/";

pub async fn health() -> impl IntoResponse {
    metrics::count_request(HEALTH_ROUTE, StatusCode::OK.as_u16());
    (StatusCode::OK, HEALTH_MESSAGE)
}

pub async fn check_available(
    State(state): State<AppState>,
    Path(product_id): Path<String>,
    headers: HeaderMap,
) -> Response {
    check(&state, &headers, &product_id).await
}

/// `/checkAvailable/` with an empty product id.
pub async fn check_available_without_id(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Response {
    check(&state, &headers, "").await
}

async fn check(state: &AppState, headers: &HeaderMap, product_id: &str) -> Response {
    let start_time = Instant::now();
    let request_id = request_id(headers);

    let parent = state.tracer.extract(headers);
    let continued = parent.is_some();
    let mut span = state.tracer.start(SPAN_NAME, parent);
    span.tag(HTTP_URL, CHECK_AVAILABLE_URL_TAG);
    span.tag(HTTP_METHOD, "GET");
    span.tag("product.id", product_id.to_string());

    let availability = Availability::of(product_id);
    let status = availability.status();
    span.tag(HTTP_STATUS_CODE, i64::from(status.as_u16()));
    span.log(availability.event());

    tracing::debug!(
        request_id = %request_id,
        product_id = %product_id,
        trace_id = %span.trace_id(),
        continued,
        outcome = availability.as_str(),
        "Availability checked"
    );

    tokio::time::sleep(availability.processing_delay()).await;
    span.finish();

    metrics::record_availability(availability);
    metrics::record_request(CHECK_AVAILABLE_ROUTE, status.as_u16(), start_time);

    (status, availability.message()).into_response()
}
