//! Binance Spot REST Adapter
//!
//! Implements the `ExchangeClient` port against the Binance spot API
//! (production or testnet, by base URL).
//!
//! Sub-modules:
//! - `auth`: HMAC-SHA256 query signing
//! - `client`: HTTP client with retries and error decoding
//! - `exchange`: Limit order placement (the port implementation)
//! - `filters`: Tick/lot grid snapping
//! - `types`: API request/response type definitions

pub mod auth;
pub mod client;
pub mod exchange;
pub mod filters;
pub mod types;

#[cfg(test)]
mod mock_server;

pub use auth::BinanceAuth;
pub use client::{BinanceClient, BinanceClientConfig};
pub use exchange::BinanceExchange;
