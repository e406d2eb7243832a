//! HTTP client for the inventory service.
//!
//! Callers (an order service, the CLI) only need to know whether a product
//! is available: 200 means yes, the inventory's 404 means no, anything else
//! is an error. Product ids are sent as a single percent-encoded path segment.

use reqwest::{Client, StatusCode, Url};
use thiserror::Error;

use crate::inventory::UNAVAILABLE_MESSAGE;
use crate::observability::propagation::TRACEPARENT_HEADER;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("invalid base URL {0}")]
    InvalidUrl(String),

    #[error("unexpected status {status}: {body}")]
    UnexpectedStatus { status: StatusCode, body: String },
}

/// Answer to an availability check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvailabilityResponse {
    pub available: bool,
    pub message: String,
}

pub struct InventoryClient {
    client: Client,
    base_url: String,
    traceparent: Option<String>,
}

impl InventoryClient {
    pub fn new(base_url: &str) -> Self {
        Self::with_client(base_url, Client::new())
    }

    /// Use a preconfigured reqwest client (timeouts, proxy settings).
    pub fn with_client(base_url: &str, client: Client) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            traceparent: None,
        }
    }

    /// Send a W3C `traceparent` with every request so the service's spans
    /// join the caller's trace.
    pub fn with_traceparent(mut self, traceparent: impl Into<String>) -> Self {
        self.traceparent = Some(traceparent.into());
        self
    }

    /// Liveness message from `/health`.
    pub async fn health(&self) -> Result<String, ClientError> {
        let resp = self.get(&["health"]).await?;
        let status = resp.status();
        let body = resp.text().await?;

        if status.is_success() {
            Ok(body)
        } else {
            Err(ClientError::UnexpectedStatus { status, body })
        }
    }

    /// Ask whether a product is available.
    pub async fn check_available(
        &self,
        product_id: &str,
    ) -> Result<AvailabilityResponse, ClientError> {
        let resp = self.get(&["checkAvailable", product_id]).await?;
        let status = resp.status();
        let message = resp.text().await?;

        match status {
            StatusCode::OK => Ok(AvailabilityResponse {
                available: true,
                message,
            }),
            // A 404 from an unknown route is not an inventory answer.
            StatusCode::NOT_FOUND if message == UNAVAILABLE_MESSAGE => Ok(AvailabilityResponse {
                available: false,
                message,
            }),
            _ => Err(ClientError::UnexpectedStatus {
                status,
                body: message,
            }),
        }
    }

    /// `base_url` with `segments` appended, each percent-encoded.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, ClientError> {
        let invalid = || ClientError::InvalidUrl(self.base_url.clone());
        let mut url = Url::parse(&self.base_url).map_err(|_| invalid())?;
        url.path_segments_mut()
            .map_err(|_| invalid())?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get(&self, segments: &[&str]) -> Result<reqwest::Response, ClientError> {
        let mut req = self.client.get(self.endpoint(segments)?);
        if let Some(traceparent) = &self.traceparent {
            req = req.header(TRACEPARENT_HEADER, traceparent);
        }
        Ok(req.send().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn endpoint(base: &str, segments: &[&str]) -> String {
        InventoryClient::new(base)
            .endpoint(segments)
            .unwrap()
            .to_string()
    }

    #[test]
    fn product_id_is_one_path_segment() {
        let base = "http://localhost:8080";
        assert_eq!(
            endpoint(base, &["checkAvailable", "1"]),
            "http://localhost:8080/checkAvailable/1"
        );
        assert_eq!(
            endpoint(base, &["checkAvailable", "1?x=2"]),
            "http://localhost:8080/checkAvailable/1%3Fx=2"
        );
        assert_eq!(
            endpoint(base, &["checkAvailable", "1/x"]),
            "http://localhost:8080/checkAvailable/1%2Fx"
        );
        assert_eq!(
            endpoint(base, &["checkAvailable", "%31"]),
            "http://localhost:8080/checkAvailable/%2531"
        );
        assert_eq!(
            endpoint(base, &["checkAvailable", ""]),
            "http://localhost:8080/checkAvailable/"
        );
    }

    #[test]
    fn base_path_is_kept() {
        assert_eq!(
            endpoint("http://localhost:8080/inventory/", &["health"]),
            "http://localhost:8080/inventory/health"
        );
    }

    #[test]
    fn unusable_base_url_is_an_error() {
        let client = InventoryClient::new("not a url");
        assert!(matches!(
            client.endpoint(&["health"]),
            Err(ClientError::InvalidUrl(_))
        ));
    }
}
