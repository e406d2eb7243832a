//! Shared utilities for integration testing.

use std::net::SocketAddr;

use inventory_service::config::ServiceConfig;
use inventory_service::http::HttpServer;
use inventory_service::observability::RequestTracer;
use inventory_service::InventoryClient;
use opentelemetry::trace::TracerProvider as _;
use opentelemetry_sdk::trace::{InMemorySpanExporter, SdkTracerProvider};
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

/// A running service on an ephemeral port whose spans are kept in memory.
pub struct TestService {
    pub addr: SocketAddr,
    pub exporter: InMemorySpanExporter,
    shutdown: oneshot::Sender<()>,
    handle: JoinHandle<Result<(), std::io::Error>>,
    _provider: SdkTracerProvider,
}

impl TestService {
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Direct HTTP client that ignores proxy settings from the environment.
    pub fn http(&self) -> reqwest::Client {
        reqwest::Client::builder().no_proxy().build().unwrap()
    }

    pub fn client(&self) -> InventoryClient {
        InventoryClient::with_client(&self.url(), self.http())
    }

    /// Trigger a graceful shutdown and wait for the server to return.
    pub async fn stop(self) {
        let _ = self.shutdown.send(());
        self.handle
            .await
            .expect("server task panicked")
            .expect("server returned an error");
    }
}

pub async fn start_service() -> TestService {
    let exporter = InMemorySpanExporter::default();
    let provider = SdkTracerProvider::builder()
        .with_simple_exporter(exporter.clone())
        .build();
    let tracer = RequestTracer::new(provider.tracer("inventory-service-it"));

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let mut config = ServiceConfig::default();
    config.listener.bind_address = addr.to_string();
    config.tracing.enabled = false;

    let (shutdown, stopped) = oneshot::channel::<()>();
    let server = HttpServer::new(config, tracer);
    let handle = tokio::spawn(server.run(listener, async move {
        let _ = stopped.await;
    }));

    TestService {
        addr,
        exporter,
        shutdown,
        handle,
        _provider: provider,
    }
}
