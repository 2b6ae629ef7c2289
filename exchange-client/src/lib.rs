//! Exchange connector layer for the proxy
//!
//! Request-scoped REST connectors for the supported exchanges, behind a
//! common [`ExchangeConnector`] trait. The gateway never talks to an
//! exchange directly: it parses an exchange id, asks the factory for a
//! connector, invokes one operation and drops the connector with the
//! request.

pub mod binance;
pub mod bybit;
pub mod config;
pub mod connector;
pub mod http;
pub mod sign;

pub use config::ConnectorConfig;
pub use connector::{ConnectorFactory, ExchangeConnector, LiveConnectorFactory, CONNECTORS};
