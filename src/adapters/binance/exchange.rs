//! Binance Exchange - Adapter for Limit Order Placement
//!
//! Implements the `ExchangeClient` port on the Binance spot REST API.
//! Every order is a GTC limit order carrying a fresh client order id,
//! with price and quantity snapped to the symbol's filters. When a price
//! band is set, prices are snapped to ticks inside that band only.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use rust_decimal::Decimal;
use tokio::sync::RwLock;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use super::client::BinanceClient;
use super::filters::SymbolFilters;
use super::types::{AvgPriceResponse, ExchangeInfoResponse, OrderResponse};
use crate::domain::batch::{OrderId, Side};
use crate::ports::exchange::{ExchangeClient, ExchangeError};

/// Rejection message Binance returns when a client order id was already used.
const DUPLICATE_ORDER_MSG: &str = "Duplicate order sent.";

/// Binance order placement backed by the shared REST client.
pub struct BinanceExchange {
    /// Shared client with signing + retry.
    client: Arc<BinanceClient>,
    /// Filters per symbol, fetched once.
    filters: RwLock<HashMap<String, SymbolFilters>>,
    /// Inclusive `(low, high)` every sent price must stay within.
    price_band: Option<(Decimal, Decimal)>,
}

impl BinanceExchange {
    pub fn new(client: Arc<BinanceClient>) -> Self {
        Self {
            client,
            filters: RwLock::new(HashMap::new()),
            price_band: None,
        }
    }

    /// Keep snapped prices inside `(low, high)`.
    #[must_use]
    pub fn with_price_band(mut self, band: (Decimal, Decimal)) -> Self {
        self.price_band = Some(band);
        self
    }

    /// Price/lot filters for `symbol`, cached after the first fetch.
    pub async fn symbol_filters(&self, symbol: &str) -> Result<SymbolFilters, ExchangeError> {
        if let Some(filters) = self.filters.read().await.get(symbol) {
            return Ok(*filters);
        }

        let info: ExchangeInfoResponse = self
            .client
            .get_public("/api/v3/exchangeInfo", &[("symbol", symbol.to_string())])
            .await?;

        let filters = info
            .symbols
            .iter()
            .find(|s| s.symbol == symbol)
            .map(SymbolFilters::from_symbol_info)
            .unwrap_or_else(|| {
                warn!(symbol, "Symbol missing from exchange info, using default filters");
                SymbolFilters::default()
            });

        info!(
            symbol,
            tick_size = %filters.tick_size,
            step_size = %filters.step_size,
            precision = filters.quantity_precision,
            "Symbol filters loaded"
        );

        self.filters
            .write()
            .await
            .insert(symbol.to_string(), filters);
        Ok(filters)
    }

    /// Current average price of `symbol`.
    pub async fn average_price(&self, symbol: &str) -> Result<Decimal, ExchangeError> {
        let avg: AvgPriceResponse = self
            .client
            .get_public("/api/v3/avgPrice", &[("symbol", symbol.to_string())])
            .await?;
        debug!(symbol, mins = avg.mins, price = %avg.price, "Average price fetched");
        Ok(avg.price)
    }

    /// Exchange id of an order that was already placed under `client_order_id`.
    ///
    /// Falls back to the client order id if the lookup fails; the order
    /// exists either way.
    async fn resolve_duplicate(&self, symbol: &str, client_order_id: String) -> OrderId {
        let params = [
            ("symbol", symbol.to_string()),
            ("origClientOrderId", client_order_id.clone()),
        ];
        match self
            .client
            .get_signed::<OrderResponse>("/api/v3/order", &params)
            .await
        {
            Ok(order) => {
                info!(
                    order_id = order.order_id,
                    client_order_id = %client_order_id,
                    "Duplicate order reported, already placed"
                );
                order.order_id.to_string()
            }
            Err(e) => {
                warn!(
                    client_order_id = %client_order_id,
                    error = %e,
                    "Duplicate order reported but lookup failed, using client order id"
                );
                client_order_id
            }
        }
    }
}

/// Snap `price` and `quantity` to the symbol's grids.
fn snap_order(
    filters: &SymbolFilters,
    price_band: Option<(Decimal, Decimal)>,
    price: Decimal,
    quantity: Decimal,
) -> Result<(Decimal, Decimal), ExchangeError> {
    let snapped_price = match price_band {
        Some((low, high)) => filters.snap_price_within(price, low, high).ok_or_else(|| {
            ExchangeError::new(
                ExchangeError::FILTER_FAILURE,
                format!("no price tick of {} inside [{low}, {high}]", filters.tick_size),
            )
        })?,
        None => filters.snap_price(price).ok_or_else(|| {
            ExchangeError::new(
                ExchangeError::FILTER_FAILURE,
                format!("price {price} rounds to zero at tick {}", filters.tick_size),
            )
        })?,
    };
    let snapped_quantity = filters.snap_quantity(quantity).ok_or_else(|| {
        ExchangeError::new(
            ExchangeError::FILTER_FAILURE,
            format!("quantity {quantity} is below lot step {}", filters.step_size),
        )
    })?;
    Ok((snapped_price, snapped_quantity))
}

/// Query parameters of a GTC limit order.
fn order_params(
    symbol: &str,
    side: Side,
    price: Decimal,
    quantity: Decimal,
    client_order_id: &str,
) -> Vec<(&'static str, String)> {
    vec![
        ("symbol", symbol.to_string()),
        ("side", side.as_str().to_string()),
        ("type", "LIMIT".to_string()),
        ("timeInForce", "GTC".to_string()),
        ("quantity", quantity.to_string()),
        ("price", price.to_string()),
        ("newClientOrderId", client_order_id.to_string()),
    ]
}

#[async_trait]
impl ExchangeClient for BinanceExchange {
    #[instrument(skip(self))]
    async fn place_limit_order(
        &self,
        symbol: &str,
        side: Side,
        price: Decimal,
        quantity: Decimal,
    ) -> Result<OrderId, ExchangeError> {
        let filters = self.symbol_filters(symbol).await?;
        let (price, quantity) = snap_order(&filters, self.price_band, price, quantity)?;

        let client_order_id = Uuid::new_v4().to_string();
        let params = order_params(symbol, side, price, quantity, &client_order_id);

        match self
            .client
            .post_signed::<OrderResponse>("/api/v3/order", &params)
            .await
        {
            Ok(response) => {
                debug!(
                    order_id = response.order_id,
                    client_order_id = %response.client_order_id,
                    status = ?response.status,
                    "Order accepted"
                );
                Ok(response.order_id.to_string())
            }
            // A retried request whose first attempt did land.
            Err(e) if e.message == DUPLICATE_ORDER_MSG => {
                Ok(self.resolve_duplicate(symbol, client_order_id).await)
            }
            Err(e) => Err(e),
        }
    }
}
