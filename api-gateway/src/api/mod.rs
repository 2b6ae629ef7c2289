//! API handlers
//!
//! One module per endpoint. Each handler follows the same pattern:
//! - Extract state and the JSON body using Axum extractors
//! - Validate input by hand, so incomplete requests get the exact
//!   rejection bodies callers already parse
//! - Build a request-scoped connector and invoke one operation
//! - Map the result to a response type or an `ApiError`

pub mod balance;
pub mod connection;
pub mod health;
pub mod response;

// Re-export the response module for easy access
pub use response::{BalanceResponse, ConnectionTestResponse, HealthResponse};
