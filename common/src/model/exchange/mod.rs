//! Exchange models and related types

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Supported exchanges
///
/// Adding an exchange means adding a variant here and an entry in the
/// connector constructor table; the gateway dispatch never branches on
/// raw name strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExchangeId {
    /// Binance spot
    Binance,
    /// Bybit v5
    Bybit,
}

impl ExchangeId {
    /// Canonical lowercase name, echoed back in responses
    pub fn as_str(&self) -> &'static str {
        match self {
            ExchangeId::Binance => "binance",
            ExchangeId::Bybit => "bybit",
        }
    }
}

impl fmt::Display for ExchangeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExchangeId {
    type Err = Error;

    /// Parse an exchange name case-insensitively
    ///
    /// Unknown names fail with `UnsupportedExchange` carrying the
    /// lowercased name, which is what error messages echo.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "binance" => Ok(ExchangeId::Binance),
            "bybit" => Ok(ExchangeId::Bybit),
            other => Err(Error::UnsupportedExchange(other.to_string())),
        }
    }
}

/// Per-request exchange API credentials
///
/// Credentials are moved into a request-scoped connector and dropped
/// with it; nothing retains them across requests. Deliberately not
/// serializable, so they cannot end up in a response or a log line.
#[derive(Clone)]
pub struct Credentials {
    /// Exchange API key
    pub api_key: String,
    /// Exchange API secret
    pub api_secret: String,
}

impl Credentials {
    /// Create credentials from key and secret
    pub fn new(api_key: impl Into<String>, api_secret: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_secret: api_secret.into(),
        }
    }
}

// Custom Debug implementation to keep the secret out of logs
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &self.api_key)
            .field("api_secret", &"<redacted>")
            .finish()
    }
}

/// Account type hint for balance queries
///
/// Bybit distinguishes spot and unified accounts; Binance has a single
/// spot wallet and ignores the hint beyond echoing it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountType {
    /// Spot account (default)
    #[default]
    Spot,
    /// Bybit unified trading account
    Unified,
}

impl AccountType {
    /// Canonical lowercase name, echoed back in responses
    pub fn as_str(&self) -> &'static str {
        match self {
            AccountType::Spot => "spot",
            AccountType::Unified => "unified",
        }
    }

    /// Parse an account-type hint, falling back to spot
    ///
    /// The hint is advisory, so unknown values degrade to the default
    /// rather than failing the request.
    pub fn parse_hint(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "unified" => AccountType::Unified,
            _ => AccountType::Spot,
        }
    }
}

impl fmt::Display for AccountType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Normalized total-balance mapping returned by a balance query
///
/// Currency code to total amount, ordered for stable serialization.
/// Amounts serialize as strings, matching the exchange wire format.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BalanceSnapshot {
    /// Total holdings per currency
    pub totals: BTreeMap<String, Decimal>,
}

impl BalanceSnapshot {
    /// Create an empty snapshot
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a currency total, dropping zero amounts
    pub fn add(&mut self, currency: impl Into<String>, amount: Decimal) {
        if amount.is_zero() {
            return;
        }
        let entry = self.totals.entry(currency.into()).or_insert(Decimal::ZERO);
        *entry += amount;
    }

    /// USDT total as a float, 0.0 when absent
    pub fn usdt_total(&self) -> f64 {
        self.totals
            .get("USDT")
            .and_then(|d| d.to_f64())
            .unwrap_or(0.0)
    }
}
