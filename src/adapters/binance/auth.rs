//! Binance Authentication - HMAC-SHA256 Query Signing
//!
//! Signs the query string of every private REST call per the Binance
//! spot API. Credentials come from environment variables
//! (BINANCE_API_KEY, BINANCE_API_SECRET).

use std::fmt;

use anyhow::{Context, Result};

/// Header carrying the API key on every authenticated request.
pub const API_KEY_HEADER: &str = "X-MBX-APIKEY";

/// Binance API credentials.
///
/// The secret is only ever used to compute signatures; it is never sent.
pub struct BinanceAuth {
    /// API key from BINANCE_API_KEY env var.
    api_key: String,
    /// API secret from BINANCE_API_SECRET env var.
    api_secret: String,
}

impl BinanceAuth {
    pub fn new(api_key: impl Into<String>, api_secret: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_secret: api_secret.into(),
        }
    }

    /// Load credentials from environment variables.
    ///
    /// Required env vars: BINANCE_API_KEY, BINANCE_API_SECRET.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("BINANCE_API_KEY").context("BINANCE_API_KEY not set")?;
        let api_secret =
            std::env::var("BINANCE_API_SECRET").context("BINANCE_API_SECRET not set")?;
        Ok(Self::new(api_key, api_secret))
    }

    /// Get the API key for request headers.
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Sign a query string.
    ///
    /// Signature format: hex(HMAC-SHA256(secret, query)), appended to the
    /// query as `signature=`.
    pub fn sign(&self, query: &str) -> String {
        let mac = hmac_sha256::HMAC::mac(query.as_bytes(), self.api_secret.as_bytes());
        hex::encode(mac)
    }
}

impl fmt::Debug for BinanceAuth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BinanceAuth")
            .field("api_key", &self.api_key)
            .field("api_secret", &"<redacted>")
            .finish()
    }
}
