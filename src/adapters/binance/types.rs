//! Binance REST Request/Response Types
//!
//! Serialization types for the spot endpoints the placer touches:
//! order placement, average price, and exchange info filters.

use rust_decimal::Decimal;
use serde::Deserialize;

/// Error body returned with every 4xx response.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorBody {
    /// Negative Binance error code, e.g. -2010.
    pub code: i64,
    /// Error message.
    pub msg: String,
}

/// Order as returned by `POST /api/v3/order` (ACK or RESULT) and by
/// `GET /api/v3/order`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderResponse {
    pub symbol: String,
    /// Exchange-assigned order id.
    pub order_id: i64,
    /// Our `newClientOrderId`, echoed back.
    pub client_order_id: String,
    /// Order status, absent in ACK responses.
    #[serde(default)]
    pub status: Option<String>,
}

/// Response from `GET /api/v3/avgPrice`.
#[derive(Debug, Clone, Deserialize)]
pub struct AvgPriceResponse {
    /// Averaging window in minutes.
    pub mins: u32,
    /// Average price over the window.
    pub price: Decimal,
}

/// Response from `GET /api/v3/exchangeInfo?symbol=...`.
#[derive(Debug, Clone, Deserialize)]
pub struct ExchangeInfoResponse {
    pub symbols: Vec<SymbolInfo>,
}

/// Trading rules of one symbol.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SymbolInfo {
    pub symbol: String,
    #[serde(default)]
    pub base_asset_precision: Option<u32>,
    #[serde(default)]
    pub filters: Vec<SymbolFilter>,
}

/// The symbol filters that shape a limit order.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "filterType")]
pub enum SymbolFilter {
    #[serde(rename = "PRICE_FILTER")]
    Price {
        #[serde(rename = "tickSize")]
        tick_size: Decimal,
    },
    #[serde(rename = "LOT_SIZE")]
    LotSize {
        #[serde(rename = "stepSize")]
        step_size: Decimal,
    },
    #[serde(other)]
    Other,
}
