//! Domain models for the exchange proxy

pub mod exchange;
