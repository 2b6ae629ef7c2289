//! Thin HTTP transport shared by the connectors

use std::time::Duration;

use tracing::debug;

use common::error::{Error, Result};

/// Raw upstream response, left to the connector to interpret
///
/// Binance signals errors through HTTP statuses while Bybit wraps them
/// in a 200 envelope, so status interpretation stays exchange-specific.
#[derive(Debug)]
pub struct HttpResponse {
    /// HTTP status code
    pub status: u16,
    /// Response body text
    pub body: String,
}

impl HttpResponse {
    /// Whether the status is in the 2xx range
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// HTTP client bound to one exchange base URL
///
/// A single attempt per request: an upstream failure is surfaced to the
/// caller immediately, there is no retry or backoff anywhere in the
/// proxy.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: reqwest::Client,
    base_url: String,
}

impl HttpClient {
    /// Build a client with the given base URL and request timeout
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::Configuration(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    /// Issue a GET request with an optional query string and headers
    pub async fn get(
        &self,
        path: &str,
        query: &str,
        headers: &[(&str, String)],
    ) -> Result<HttpResponse> {
        let url = if query.is_empty() {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}{}?{}", self.base_url, path, query)
        };

        let mut request = self.client.get(&url);
        for (name, value) in headers {
            request = request.header(*name, value.as_str());
        }

        let response = request.send().await.map_err(classify_transport_error)?;
        let status = response.status().as_u16();
        let body = response.text().await.map_err(classify_transport_error)?;

        debug!("GET {} -> {}", path, status);

        Ok(HttpResponse { status, body })
    }
}

/// Map transport failures onto the network error variant
fn classify_transport_error(e: reqwest::Error) -> Error {
    if e.is_timeout() {
        Error::Network(format!("Request timed out: {}", e))
    } else if e.is_connect() {
        Error::Network(format!("Connection failed: {}", e))
    } else {
        Error::Network(e.to_string())
    }
}
