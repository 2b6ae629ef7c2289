//! Common types and utilities for the exchange proxy
//!
//! This library contains the types shared between the gateway and the
//! exchange connector layer: a unified error taxonomy and the domain
//! model for exchanges, credentials and balance snapshots.

pub mod error;
pub mod model;

/// Re-export important types
pub use error::{Error, Result};
pub use model::exchange::{AccountType, BalanceSnapshot, Credentials, ExchangeId};
