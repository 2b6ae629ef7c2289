//! Connector trait and constructor registry

use async_trait::async_trait;

use common::error::{Error, Result};
use common::model::exchange::{AccountType, BalanceSnapshot, Credentials, ExchangeId};

use crate::binance::BinanceConnector;
use crate::bybit::BybitConnector;
use crate::config::ConnectorConfig;

/// One exchange session, scoped to a single request
///
/// Connectors built without credentials can still serve public market
/// data; balance queries on them fail before any network use.
#[async_trait]
pub trait ExchangeConnector: Send + Sync {
    /// The exchange this connector talks to
    fn id(&self) -> ExchangeId;

    /// Fetch the account's total balance per currency
    async fn fetch_total_balance(&self, account_type: AccountType) -> Result<BalanceSnapshot>;

    /// Fetch the number of markets listed on the exchange
    async fn fetch_market_count(&self) -> Result<usize>;
}

/// Connector constructor signature used by the registry
pub type ConnectorCtor =
    fn(Option<Credentials>, &ConnectorConfig) -> Result<Box<dyn ExchangeConnector>>;

/// Supported exchanges and their connector constructors
///
/// Extending the proxy to another exchange is an entry here plus a
/// connector module; the gateway never branches on name strings.
pub const CONNECTORS: &[(ExchangeId, ConnectorCtor)] = &[
    (ExchangeId::Binance, BinanceConnector::boxed),
    (ExchangeId::Bybit, BybitConnector::boxed),
];

/// Builds request-scoped connectors for the gateway
///
/// A trait so tests can substitute canned connectors for the live
/// registry.
pub trait ConnectorFactory: Send + Sync {
    /// Authenticated connector for balance queries
    fn authenticated(
        &self,
        exchange: ExchangeId,
        credentials: Credentials,
    ) -> Result<Box<dyn ExchangeConnector>>;

    /// Unauthenticated connector for public market data
    fn public(&self, exchange: ExchangeId) -> Result<Box<dyn ExchangeConnector>>;
}

/// Production factory backed by the constructor registry
#[derive(Debug, Clone)]
pub struct LiveConnectorFactory {
    config: ConnectorConfig,
}

impl LiveConnectorFactory {
    /// Create a factory with the given connector configuration
    pub fn new(config: ConnectorConfig) -> Self {
        Self { config }
    }

    /// Look up the constructor for an exchange and invoke it
    fn build(
        &self,
        exchange: ExchangeId,
        credentials: Option<Credentials>,
    ) -> Result<Box<dyn ExchangeConnector>> {
        let ctor = CONNECTORS
            .iter()
            .find(|(id, _)| *id == exchange)
            .map(|(_, ctor)| ctor)
            .ok_or_else(|| Error::UnsupportedExchange(exchange.to_string()))?;

        ctor(credentials, &self.config)
    }
}

impl ConnectorFactory for LiveConnectorFactory {
    fn authenticated(
        &self,
        exchange: ExchangeId,
        credentials: Credentials,
    ) -> Result<Box<dyn ExchangeConnector>> {
        self.build(exchange, Some(credentials))
    }

    fn public(&self, exchange: ExchangeId) -> Result<Box<dyn ExchangeConnector>> {
        self.build(exchange, None)
    }
}
