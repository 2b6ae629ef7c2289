//! Configuration for the exchange connectors

use std::env;
use std::time::Duration;

/// Configuration for the exchange connectors
///
/// The base URLs are overridable so tests can point a connector at a
/// local mock server instead of the live exchange.
#[derive(Debug, Clone)]
pub struct ConnectorConfig {
    /// Binance REST base URL
    pub binance_api_url: String,
    /// Bybit REST base URL
    pub bybit_api_url: String,
    /// Timeout applied to every upstream request
    pub http_timeout: Duration,
    /// Signed-request receive window in milliseconds
    pub recv_window_ms: u64,
}

impl Default for ConnectorConfig {
    fn default() -> Self {
        Self {
            binance_api_url: env::var("BINANCE_API_URL")
                .unwrap_or_else(|_| "https://api.binance.com".to_string()),
            bybit_api_url: env::var("BYBIT_API_URL")
                .unwrap_or_else(|_| "https://api.bybit.com".to_string()),
            http_timeout: Duration::from_secs(
                env::var("EXCHANGE_HTTP_TIMEOUT_SECS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(10),
            ),
            recv_window_ms: env::var("EXCHANGE_RECV_WINDOW_MS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(5000),
        }
    }
}

impl ConnectorConfig {
    /// Create a new configuration using environment variables
    pub fn from_env() -> Self {
        Self::default()
    }
}
