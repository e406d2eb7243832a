//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Wire up middleware (request ID, tracing, timeout)
//! - Bind server to listener
//! - Stop gracefully on a signal or an explicit shutdown

use axum::{
    body::Body,
    http::{Request, StatusCode},
    routing::get,
    Router,
};
use std::future::Future;
use std::time::Duration;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::ServiceConfig;
use crate::http::handlers;
use crate::http::request::{request_id, x_request_id};
use crate::lifecycle::signals::shutdown_signal;
use crate::observability::RequestTracer;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub tracer: RequestTracer,
}

/// HTTP server for the inventory service.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration and tracer.
    pub fn new(config: ServiceConfig, tracer: RequestTracer) -> Self {
        let state = AppState { tracer };
        let router = Self::build_router(&config, state);
        Self { router }
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(config: &ServiceConfig, state: AppState) -> Router {
        let middleware = ServiceBuilder::new()
            .layer(SetRequestIdLayer::new(x_request_id(), MakeRequestUuid))
            .layer(
                TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
                    tracing::info_span!(
                        "request",
                        method = %request.method(),
                        uri = %request.uri(),
                        request_id = %request_id(request.headers()),
                    )
                }),
            )
            .layer(PropagateRequestIdLayer::new(x_request_id()))
            .layer(TimeoutLayer::with_status_code(
                StatusCode::REQUEST_TIMEOUT,
                Duration::from_secs(config.timeouts.request_secs),
            ));

        Router::new()
            .route(handlers::HEALTH_ROUTE, get(handlers::health))
            .route(handlers::CHECK_AVAILABLE_ROUTE, get(handlers::check_available))
            .route(
                handlers::CHECK_AVAILABLE_EMPTY_ROUTE,
                get(handlers::check_available_without_id),
            )
            .with_state(state)
            .layer(middleware)
    }

    /// The fully layered router, for driving the service in-process.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server until an OS signal arrives or `shutdown` resolves.
    pub async fn run<F>(self, listener: TcpListener, shutdown: F) -> Result<(), std::io::Error>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                tokio::select! {
                    _ = shutdown_signal() => {},
                    _ = shutdown => {
                        tracing::info!("Shutdown requested");
                    },
                }
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}
