//! Application configuration

use std::env;

/// Placeholder secret used when PROXY_API_KEY is not set
pub const DEFAULT_API_KEY: &str = "change-this-secret-key";

/// Gateway configuration
///
/// Loaded once at startup and moved into the shared state; nothing
/// reads the environment after that.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Listen port
    pub port: u16,
    /// Static bearer secret protecting the proxy endpoints
    pub api_key: String,
}

impl AppConfig {
    /// Create a new configuration from environment variables
    pub fn new() -> Self {
        Self {
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            api_key: env::var("PROXY_API_KEY").unwrap_or_else(|_| DEFAULT_API_KEY.to_string()),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::new()
    }
}
